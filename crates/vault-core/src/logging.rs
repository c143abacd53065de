//! File logging setup.
//!
//! The interactive shell owns the terminal, so every subscriber writes to a
//! daily-rolling file under `${VAULT_HOME}/logs` instead of stderr.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{Config, paths};

/// Environment variable holding a filter directive that overrides `[logging].level`.
pub const LOG_ENV: &str = "VAULT_LOG";

const LOG_FILE_PREFIX: &str = "vault.log";

/// Installs the global subscriber writing to `${VAULT_HOME}/logs`.
///
/// The returned guard flushes buffered lines on drop and must be held for
/// the lifetime of the process.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    init_in(&paths::logs_dir(), &config.logging.level)
}

/// Installs the global subscriber writing into `dir`.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init_in(dir: &Path, default_level: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter_for(default_level))
        .with(layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(log_dir = %dir.display(), "logging initialized");
    Ok(guard)
}

/// Builds the filter from `VAULT_LOG`, falling back to `default_level`, then `info`.
fn filter_for(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_applies_without_env_override() {
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        assert_eq!(filter_for("warn").to_string(), "warn");
    }
}
