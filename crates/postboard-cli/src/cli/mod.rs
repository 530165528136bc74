//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use postboard_core::config::{self, BackendKind};
use postboard_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "postboard")]
#[command(version)]
#[command(about = "Post board: list posts, write one, sign in and out")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Backend to use (overrides config): memory or http
    #[arg(long, global = true, value_name = "KIND")]
    backend: Option<BackendKind>,

    /// Base URL of the web app (http backend, overrides config)
    #[arg(long, global = true, value_name = "URL", env = "POSTBOARD_BASE_URL")]
    base_url: Option<String>,

    /// Debug-level logging on stderr (non-interactive commands)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List or create posts
    Posts {
        #[command(subcommand)]
        command: PostCommands,
    },
    /// Show the current session
    Session,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum PostCommands {
    /// Lists posts in backend order
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Creates a post as the signed-in user
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        command,
        backend,
        base_url,
        verbose,
    } = cli;
    let load = || load_config(backend, base_url.clone());

    // default to the interactive page
    let Some(command) = command else {
        return commands::page::run(&load()?);
    };

    logging::init_stderr(verbose)?;

    match command {
        Commands::Posts { command } => match command {
            PostCommands::List { json } => commands::posts::list(&load()?, json).await,
            PostCommands::Create { title, body } => {
                commands::posts::create(&load()?, title, body).await
            }
        },
        Commands::Session => commands::session::show(&load()?).await,

        // Config commands must work even when the config file is broken.
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

/// Loads the config file and applies command-line overrides.
fn load_config(backend: Option<BackendKind>, base_url: Option<String>) -> Result<config::Config> {
    let mut config = config::Config::load().context("load config")?;
    if let Some(kind) = backend {
        config.backend = kind;
    }
    if let Some(url) = base_url {
        config.http.base_url = url;
    }
    Ok(config)
}
