//! Full-screen terminal front end for the vault.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
pub use runtime::TuiRuntime;
use vault_core::VaultServices;

/// Runs the vault shell until the user quits.
///
/// # Errors
/// Returns an error when not attached to a terminal or when terminal I/O fails.
pub async fn run_interactive(services: VaultServices) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The vault shell requires a terminal.\n\
             Use `vault generate -p '...'` for non-interactive generation."
        );
    }

    let mut runtime = TuiRuntime::new(services)?;
    runtime.run()
}
