//! Core services for postboard: configuration, logging, backend adapters and
//! the query invalidation bus.

pub mod backend;
pub mod config;
pub mod invalidation;
pub mod logging;
