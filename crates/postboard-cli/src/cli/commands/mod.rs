//! CLI command handlers.

pub mod config;
pub mod page;
pub mod posts;
pub mod session;
