//! Auth button view model.

use postboard_types::Session;

use super::state::AuthState;
use crate::common::Query;
use crate::state::is_signed_in;

pub const SIGN_IN_LABEL: &str = "Sign in";
pub const SIGN_OUT_LABEL: &str = "Sign out";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    SignIn,
    SignOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthButtonView {
    pub label: &'static str,
    pub action: AuthAction,
    pub focused: bool,
    /// Signed-in user's display name.
    pub user: Option<String>,
    /// Red line under the button: action failure, else session query failure.
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl AuthButtonView {
    pub fn build(
        auth: &AuthState,
        session: &Query<Option<Session>>,
        focused: bool,
    ) -> Self {
        let (label, action) = if is_signed_in(session) {
            (SIGN_OUT_LABEL, AuthAction::SignOut)
        } else {
            (SIGN_IN_LABEL, AuthAction::SignIn)
        };
        let user = session
            .data()
            .and_then(Option::as_ref)
            .map(|s| s.display_name().to_string());
        let error = auth.error.clone().or_else(|| {
            session
                .error()
                .map(|error| format!("Session error: {error}"))
        });

        Self {
            label,
            action,
            focused,
            user,
            error,
            notice: auth.notice.clone(),
        }
    }
}
