//! Configuration management for postboard.
//!
//! Loads configuration from ${POSTBOARD_HOME}/config.toml with sensible defaults.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use postboard_types::DEFAULT_DATE_FORMAT;
use serde::{Deserialize, Serialize};

/// Which backend adapter serves posts and sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Process-local store, signed in as the configured identity.
    #[default]
    Memory,
    /// Remote web app speaking the tRPC JSON envelope.
    Http,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Memory => f.write_str("memory"),
            BackendKind::Http => f.write_str("http"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            "http" => Ok(BackendKind::Http),
            other => anyhow::bail!("Unknown backend '{other}' (expected 'memory' or 'http')"),
        }
    }
}

/// HTTP backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub base_url: String,
    /// Sent as the `next-auth.session-token` cookie.
    pub session_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: Config::DEFAULT_BASE_URL.to_string(),
            session_token: None,
            timeout_secs: Config::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// In-memory backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    pub seed_demo_posts: bool,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            seed_demo_posts: true,
        }
    }
}

/// Identity used when signing in against the memory backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub name: String,
    pub image: Option<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            name: Config::DEFAULT_IDENTITY_NAME.to_string(),
            image: None,
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub title: String,
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: Config::DEFAULT_TITLE.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

pub mod paths {
    //! Path resolution for postboard configuration and log directories.
    //!
    //! POSTBOARD_HOME resolution order:
    //! 1. POSTBOARD_HOME environment variable (if set)
    //! 2. ~/.config/postboard (default)

    use std::path::PathBuf;

    /// Returns the postboard home directory.
    ///
    /// Falls back to a relative `.postboard` directory when no home directory
    /// can be determined.
    pub fn postboard_home() -> PathBuf {
        if let Ok(home) = std::env::var("POSTBOARD_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".postboard"),
            |h| h.join(".config").join("postboard"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        postboard_home().join("config.toml")
    }

    /// Returns the directory holding TUI log files.
    pub fn logs_dir() -> PathBuf {
        postboard_home().join("logs")
    }
}

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend adapter selection.
    pub backend: BackendKind,
    pub http: HttpConfig,
    pub memory: MemoryConfig,
    pub identity: IdentityConfig,
    pub display: DisplayConfig,
}

impl Config {
    const DEFAULT_BASE_URL: &str = "http://localhost:3000";
    const DEFAULT_TIMEOUT_SECS: u64 = 10;
    const DEFAULT_IDENTITY_NAME: &str = "Demo User";
    const DEFAULT_TITLE: &str = "Create T3 App";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?;
            tracing::debug!(path = %path.display(), backend = %config.backend, "loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default config to `path`.
    ///
    /// Fails if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}
