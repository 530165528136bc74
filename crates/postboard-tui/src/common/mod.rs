//! Shared building blocks for the feature slices.

pub mod query;
pub mod task;
pub mod text;
pub mod text_field;

pub use query::{Query, QueryPhase};
pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
pub use text_field::TextField;
