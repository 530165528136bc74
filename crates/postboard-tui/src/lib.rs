//! Full-screen TUI for postboard.
//!
//! One page: a post creation form, the post grid and an auth toggle, all
//! driven by an Elm-style reducer (`update`) whose effects the runtime runs
//! against the injected backend services.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;
pub mod view;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
pub use features::{auth, compose, posts};
use postboard_core::backend::Services;
use postboard_core::config::Config;
pub use runtime::{EffectRunner, TuiRuntime};

use crate::state::AppState;

/// Runs the interactive page until the user quits.
///
/// # Errors
/// Fails without a terminal on stdout, or if the terminal cannot be set up.
pub fn run_interactive(config: &Config, services: Services) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The interactive page requires a terminal.\n\
             Use `postboard posts list` for non-interactive output."
        );
    }

    let state = AppState::new(config.display.clone());
    let mut runtime = TuiRuntime::new(state, services)?;
    runtime.run()
}
