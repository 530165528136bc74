//! Application state composition.
//!
//! ```text
//! AppState
//! ├── focus: Focus                      (which control receives keys)
//! ├── posts: Query<Vec<Post>>           (list query)
//! ├── posts_first_row: usize            (grid scroll offset)
//! ├── session: Query<Option<Session>>   (session query, read by form + auth)
//! ├── compose: ComposeState             (title/body fields, last error)
//! ├── auth: AuthState                   (auth action feedback)
//! ├── task_seq: TaskSeq                 (async task id generator)
//! └── tasks: Tasks                      (task lifecycle state)
//! ```
//!
//! The session query is owned here once and handed to each view explicitly;
//! no slice reaches for it through a global.

use postboard_core::config::DisplayConfig;
use postboard_types::{Post, Session};

use crate::auth::AuthState;
use crate::common::{Query, TaskSeq, Tasks};
use crate::compose::ComposeState;

/// Focusable controls, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Title,
    Body,
    Submit,
    Auth,
}

impl Focus {
    const ORDER: [Focus; 4] = [Focus::Title, Focus::Body, Focus::Submit, Focus::Auth];

    fn index(self) -> usize {
        Self::ORDER
            .iter()
            .position(|f| *f == self)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn is_field(self) -> bool {
        matches!(self, Focus::Title | Focus::Body)
    }
}

/// Complete UI state.
#[derive(Debug)]
pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    pub focus: Focus,
    pub posts: Query<Vec<Post>>,
    /// First grid row shown in the post list.
    pub posts_first_row: usize,
    pub session: Query<Option<Session>>,
    pub compose: ComposeState,
    pub auth: AuthState,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    pub display: DisplayConfig,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            should_quit: false,
            focus: Focus::default(),
            posts: Query::new(),
            posts_first_row: 0,
            session: Query::new(),
            compose: ComposeState::default(),
            auth: AuthState::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            display,
            spinner_frame: 0,
        }
    }

    /// True iff the session query resolved to a present session.
    ///
    /// A pending or failed session query counts as signed out.
    pub fn is_signed_in(&self) -> bool {
        is_signed_in(&self.session)
    }
}

/// Session gate shared by the form and the auth toggle.
pub fn is_signed_in(session: &Query<Option<Session>>) -> bool {
    matches!(session.data(), Some(Some(_)))
}
