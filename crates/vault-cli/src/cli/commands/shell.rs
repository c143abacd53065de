//! Interactive shell command.

use anyhow::Result;
use vault_core::{Config, VaultServices};

#[cfg(feature = "tui")]
pub async fn run(config: Config) -> Result<()> {
    let services = VaultServices::from_config(config)?;
    vault_tui::run_interactive(services).await
}

#[cfg(not(feature = "tui"))]
pub async fn run(_config: Config) -> Result<()> {
    anyhow::bail!(
        "This build has no interactive shell.\n\
         Use `vault generate -p '...'` for non-interactive generation."
    )
}
