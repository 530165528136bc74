//! Auth toggle feedback state.
//!
//! Whether the viewer is signed in is not stored here; it is read from the
//! session query on `AppState`.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    /// Last sign-in / sign-out failure.
    pub error: Option<String>,
    /// Hint shown while a browser sign-in is pending.
    pub notice: Option<String>,
}

impl AuthState {
    pub fn clear(&mut self) {
        self.error = None;
        self.notice = None;
    }
}
