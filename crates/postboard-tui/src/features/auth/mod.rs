//! Auth toggle: session query handling and the sign-in / sign-out button.

mod render;
mod state;
mod update;
mod view;

pub use render::{AUTH_HEIGHT, render_auth};
pub use state::AuthState;
pub use update::{
    BROWSER_SIGN_IN_NOTICE, handle_session_invalidated, handle_session_loaded, handle_sign_in,
    handle_sign_out, request_session_fetch, toggle,
};
pub use view::{AuthAction, AuthButtonView, SIGN_IN_LABEL, SIGN_OUT_LABEL};
