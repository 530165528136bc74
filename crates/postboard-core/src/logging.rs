//! Tracing subscriber setup.
//!
//! The TUI owns stdout/stderr while running, so interactive mode writes logs to
//! `${POSTBOARD_HOME}/logs/postboard.log`. One-shot CLI commands log to stderr.
//! Filtering comes from `POSTBOARD_LOG` (EnvFilter syntax), default `warn`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "POSTBOARD_LOG";

const DEFAULT_LEVEL: &str = "warn";
const LOG_FILE_NAME: &str = "postboard.log";

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initializes stderr logging for non-interactive commands.
///
/// `verbose` lowers the default level to `debug`; an explicit `POSTBOARD_LOG`
/// still wins.
pub fn init_stderr(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { DEFAULT_LEVEL };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

/// Initializes file logging for the interactive TUI.
///
/// The returned guard flushes the non-blocking writer on drop; keep it alive
/// for the lifetime of the UI.
pub fn init_file(logs_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::never(logs_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_LEVEL))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(guard)
}
