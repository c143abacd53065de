//! Configuration management for the vault.
//!
//! Loads configuration from ${VAULT_HOME}/config.toml with sensible defaults.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use toml_edit::{DocumentMut, Item, Table, value};

use crate::storage;

/// Commented template written by `vault config init`.
const CONFIG_TEMPLATE: &str = include_str!("../default_config.toml");

pub mod paths {
    //! Path resolution for vault configuration and data directories.
    //!
    //! VAULT_HOME resolution order:
    //! 1. VAULT_HOME environment variable (if set)
    //! 2. ~/.config/vault (default)
    //! 3. ./.vault when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the vault home directory.
    pub fn vault_home() -> PathBuf {
        if let Ok(home) = std::env::var("VAULT_HOME")
            && !home.trim().is_empty()
        {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".vault"),
            |h| h.join(".config").join("vault"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        vault_home().join("config.toml")
    }

    /// Returns the path of the persisted identity session.
    pub fn session_path() -> PathBuf {
        vault_home().join("session.json")
    }

    /// Returns the path of the cached secret used by the biometric unlock.
    pub fn credential_path() -> PathBuf {
        vault_home().join("credential")
    }

    /// Returns the directory generated preview pages are written to.
    pub fn previews_dir() -> PathBuf {
        vault_home().join("previews")
    }

    /// Returns the log directory.
    pub fn logs_dir() -> PathBuf {
        vault_home().join("logs")
    }
}

/// Identity provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Optional web API key (overrides `VAULT_IDENTITY_API_KEY`).
    pub api_key: Option<String>,
    /// Optional Identity Toolkit base URL.
    pub base_url: Option<String>,
    /// Optional secure token service base URL.
    pub token_url: Option<String>,
    /// The single account this vault signs in as.
    pub account: String,
}

impl IdentityConfig {
    pub const DEFAULT_ACCOUNT: &str = "owner@vault.local";

    /// Returns the effective API key if set and non-empty.
    pub fn effective_api_key(&self) -> Option<&str> {
        non_empty(self.api_key.as_deref())
    }

    /// Returns the effective base URL if set and non-empty.
    pub fn effective_base_url(&self) -> Option<&str> {
        non_empty(self.base_url.as_deref())
    }

    /// Returns the effective token URL if set and non-empty.
    pub fn effective_token_url(&self) -> Option<&str> {
        non_empty(self.token_url.as_deref())
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            token_url: None,
            account: Self::DEFAULT_ACCOUNT.to_string(),
        }
    }
}

/// Generation provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Model used for component generation.
    pub model: String,
    /// Optional API key (overrides `GEMINI_API_KEY`).
    pub api_key: Option<String>,
    /// Optional API base URL.
    pub base_url: Option<String>,
}

impl GenerationConfig {
    pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

    pub fn effective_api_key(&self) -> Option<&str> {
        non_empty(self.api_key.as_deref())
    }

    pub fn effective_base_url(&self) -> Option<&str> {
        non_empty(self.base_url.as_deref())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: Self::DEFAULT_MODEL.to_string(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Platform verifier settings for the biometric unlock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BiometricConfig {
    /// Verifier program; unset disables the biometric path.
    pub command: Option<String>,
    /// Seconds to wait for the verifier before treating it as cancelled.
    pub timeout_secs: u64,
}

impl BiometricConfig {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for BiometricConfig {
    fn default() -> Self {
        Self {
            command: None,
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Start each session with the demo design records.
    pub seed_examples: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            seed_examples: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive for the log file.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub identity: IdentityConfig,
    pub generation: GenerationConfig,
    pub biometric: BiometricConfig,
    pub registry: RegistryConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Reads `${VAULT_HOME}/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Reads the config at `path`; a missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let Some(contents) = storage::read_optional(path)? else {
            return Ok(Self::default());
        };
        toml::from_str(&contents).with_context(|| format!("Invalid config at {}", path.display()))
    }

    /// Writes the commented template to `path`.
    ///
    /// # Errors
    /// Returns an error if a file is already there or it cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        storage::write_atomic(path, CONFIG_TEMPLATE)
    }

    /// Sets `identity.account` in `${VAULT_HOME}/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config cannot be read, parsed or written.
    pub fn save_account(account: &str) -> Result<()> {
        Self::save_account_to(&paths::config_path(), account)
    }

    /// Sets `identity.account` in the file at `path`, leaving every other
    /// line as the user wrote it. A missing file starts from the template.
    ///
    /// # Errors
    /// Returns an error if the config cannot be read, parsed or written.
    pub fn save_account_to(path: &Path, account: &str) -> Result<()> {
        let existing = storage::read_optional(path)?;
        let mut doc: DocumentMut = existing
            .as_deref()
            .unwrap_or(CONFIG_TEMPLATE)
            .parse()
            .with_context(|| format!("Invalid config at {}", path.display()))?;

        let identity = doc
            .entry("identity")
            .or_insert_with(|| Item::Table(Table::new()));
        identity["account"] = value(account);

        storage::write_atomic(path, &doc.to_string())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.generation.model, "gemini-3-flash-preview");
        assert_eq!(config.identity.account, "owner@vault.local");
        assert!(config.biometric.command.is_none());
        assert!(config.registry.seed_examples);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "[generation]\nmodel = \"gemini-2.5-pro\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.generation.model, "gemini-2.5-pro");
        assert_eq!(config.biometric.timeout_secs, 60);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let config: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.generation.model, GenerationConfig::DEFAULT_MODEL);
        assert_eq!(config.identity.account, IdentityConfig::DEFAULT_ACCOUNT);
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("gemini-3-flash-preview"));
        assert!(contents.contains("# command = \"fprintd-verify\""));
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_save_account_keeps_user_lines() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            "# mine\n[generation]\nmodel = \"custom\"\n",
        )
        .unwrap();

        Config::save_account_to(&config_path, "me@example.com").unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.starts_with("# mine\n"));
        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.identity.account, "me@example.com");
        assert_eq!(config.generation.model, "custom");
    }

    #[test]
    fn test_save_account_without_file_uses_template() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        Config::save_account_to(&config_path, "me@example.com").unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# Identity Toolkit web API key"));
        assert!(contents.contains("account = \"me@example.com\""));
    }

    #[test]
    fn test_blank_api_key_is_not_effective() {
        let identity = IdentityConfig {
            api_key: Some("   ".to_string()),
            ..IdentityConfig::default()
        };
        assert_eq!(identity.effective_api_key(), None);
    }

    #[test]
    fn test_biometric_timeout_has_floor() {
        let biometric = BiometricConfig {
            command: None,
            timeout_secs: 0,
        };
        assert_eq!(biometric.timeout(), Duration::from_secs(1));
    }
}
