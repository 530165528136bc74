//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never performs I/O or spawns tasks directly.

use postboard_types::{CreatePostInput, QueryKey};
use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Run the list query.
    FetchPosts { task: TaskId },

    /// Run the session query.
    FetchSession { task: TaskId },

    /// Run the create mutation.
    CreatePost {
        task: TaskId,
        input: CreatePostInput,
    },

    /// Ask the auth subsystem to sign in.
    SignIn { task: TaskId },

    /// Ask the auth subsystem to sign out.
    SignOut { task: TaskId },

    /// Publish a staleness signal on the invalidation bus.
    Invalidate { key: QueryKey },

    /// Open a URL in the system browser.
    OpenBrowser { url: String },

    /// Cancel an in-progress task.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },
}
