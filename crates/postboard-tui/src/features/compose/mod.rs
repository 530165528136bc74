//! Post creation form: title/body fields, session-gated submit.

mod render;
mod state;
mod update;
mod view;

pub use render::{COMPOSE_HEIGHT, render_compose};
pub use state::{ComposeState, Field};
pub use update::{handle_field_key, handle_field_paste, handle_post_created, submit};
pub use view::{ComposeView, FieldView, HEADING, SIGNED_OUT_LABEL, SUBMIT_LABEL};
