//! Last manually entered secret, kept for the biometric unlock.
//!
//! The secret is stored as plain text. The file is created with owner-only
//! permissions but nothing else protects it.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::paths;
use crate::storage;

#[derive(Debug, Clone)]
pub struct CredentialCache {
    path: PathBuf,
}

impl CredentialCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache at `${VAULT_HOME}/credential`.
    pub fn default_location() -> Self {
        Self::new(paths::credential_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the cached secret.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn store(&self, secret: &str) -> Result<()> {
        storage::write_private(&self.path, secret)
    }

    /// Returns the cached secret exactly as stored; an empty file counts as absent.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read.
    pub fn load(&self) -> Result<Option<String>> {
        Ok(storage::read_optional(&self.path)?.filter(|secret| !secret.is_empty()))
    }

    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<bool> {
        storage::remove_if_exists(&self.path)
    }

    pub fn warn_if_present(&self) {
        if self.path.exists() {
            tracing::warn!(
                path = %self.path.display(),
                "credential cache holds an unencrypted password"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn stores_secret_verbatim() {
        let dir = tempdir().unwrap();
        let cache = CredentialCache::new(dir.path().join("credential"));

        cache.store(" pass word\n").unwrap();
        assert_eq!(cache.load().unwrap().as_deref(), Some(" pass word\n"));
    }

    #[test]
    fn overwrite_replaces_previous_secret() {
        let dir = tempdir().unwrap();
        let cache = CredentialCache::new(dir.path().join("credential"));

        cache.store("first-secret").unwrap();
        cache.store("second").unwrap();
        assert_eq!(cache.load().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn empty_or_missing_cache_is_absent() {
        let dir = tempdir().unwrap();
        let cache = CredentialCache::new(dir.path().join("credential"));
        assert!(cache.load().unwrap().is_none());

        cache.store("").unwrap();
        assert!(cache.load().unwrap().is_none());

        assert!(cache.clear().unwrap());
        assert!(!cache.clear().unwrap());
    }
}
