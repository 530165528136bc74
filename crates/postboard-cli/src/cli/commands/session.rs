//! Session command handler.

use anyhow::{Context, Result};
use postboard_core::backend::Services;
use postboard_core::config::Config;

pub async fn show(config: &Config) -> Result<()> {
    let services = Services::from_config(config).context("wire backend")?;
    match services
        .session
        .get_session()
        .await
        .context("read session")?
    {
        Some(session) => {
            println!("Signed in as {}", session.display_name());
            if let Some(expires) = session.expires {
                println!("Expires {}", expires.to_rfc3339());
            }
        }
        None => println!("Not signed in"),
    }
    Ok(())
}
