//! Interactive page handler.

use anyhow::Result;
use postboard_core::config::Config;

#[cfg(feature = "tui")]
pub fn run(config: &Config) -> Result<()> {
    use anyhow::Context;
    use postboard_core::backend::Services;
    use postboard_core::{config, logging};

    // Logs go to a file: the TUI owns the terminal.
    let _guard = logging::init_file(&config::paths::logs_dir())?;
    let services = Services::from_config(config).context("wire backend")?;
    postboard_tui::run_interactive(config, services).context("interactive page failed")
}

#[cfg(not(feature = "tui"))]
pub fn run(_config: &Config) -> Result<()> {
    anyhow::bail!("Built without the interactive page. Use `postboard posts list`.")
}
