//! Feature slices for the TUI (state/update/view/render per slice).

pub mod auth;
pub mod compose;
pub mod posts;
