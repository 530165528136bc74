//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: terminal input,
//! timer ticks, invalidation signals and async task results.

use crossterm::event::Event;
use postboard_core::backend::SignIn;
use postboard_types::{Post, QueryKey, Session};

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

#[derive(Debug)]
pub enum UiEvent {
    /// Frame timer; the runtime renders after each tick.
    Tick,

    /// Raw terminal input.
    Terminal(Event),

    /// A query was marked stale on the invalidation bus.
    Invalidated(QueryKey),

    /// An async task started (carries its cancel token, if any).
    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },

    /// An async task finished; `result` is the event it produced.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// List query outcome.
    PostsLoaded(Result<Vec<Post>, String>),

    /// Session query outcome.
    SessionLoaded(Result<Option<Session>, String>),

    /// Create mutation outcome.
    PostCreated(Result<Post, String>),

    /// Sign-in action outcome.
    SignInFinished(Result<SignIn, String>),

    /// Sign-out action outcome.
    SignOutFinished(Result<(), String>),
}
