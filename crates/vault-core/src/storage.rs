//! Small helpers for the files the vault keeps under `${VAULT_HOME}`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Writes `contents` to `path`, creating parent directories, with 0600 permissions on unix.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn write_private(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(path)
        .with_context(|| format!("Failed to open {} for writing", path.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;
    Ok(())
}

/// Replaces `path` through a sibling temp file so readers never see a partial write.
///
/// # Errors
/// Returns an error if the directory, temp file or rename fails.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let staging = path.with_extension("tmp");
    fs::write(&staging, contents)
        .with_context(|| format!("Failed to write {}", staging.display()))?;
    fs::rename(&staging, path)
        .with_context(|| format!("Failed to move {} into place", staging.display()))
}

/// Reads `path`, returning `None` when it does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Removes `path`; returns whether a file was there.
///
/// # Errors
/// Returns an error if the file exists but cannot be removed.
pub fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn write_private_creates_parents_and_truncates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("secret");

        write_private(&path, "first value").unwrap();
        write_private(&path, "second").unwrap();

        assert_eq!(read_optional(&path).unwrap().as_deref(), Some("second"));
    }

    #[cfg(unix)]
    #[test]
    fn write_private_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("secret");
        write_private(&path, "x").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn write_atomic_leaves_no_staging_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("conf").join("config.toml");

        write_atomic(&path, "a = 1\n").unwrap();

        assert_eq!(read_optional(&path).unwrap().as_deref(), Some("a = 1\n"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn missing_files_are_not_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent");
        assert!(read_optional(&path).unwrap().is_none());
        assert!(!remove_if_exists(&path).unwrap());
    }
}
