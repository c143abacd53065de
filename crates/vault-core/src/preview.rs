//! Isolated preview documents for generated markup.
//!
//! Each preview is a standalone HTML page carrying the token config and the
//! custom CSS, opened in the system browser.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::paths;
use crate::tokens;

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";
const FONTS_HREF: &str = "https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;800&family=JetBrains+Mono:wght@300;400;500;700&display=swap";
const PREVIEW_RESET_CSS: &str = "body { min-height: 100vh; display: flex; flex-direction: column; align-items: center; justify-content: center; padding: 2rem; }";

/// Wraps body markup into a full page. The markup is inserted verbatim.
pub fn wrap_html(body: &str) -> String {
    let config = tokens::tailwind_config();
    let custom_css = tokens::CUSTOM_CSS;
    format!(
        "<!DOCTYPE html>
<html>
<head>
    <meta charset=\"utf-8\">
    <script src=\"{TAILWIND_CDN}\"></script>
    <script>
        tailwind.config = {config}
    </script>
    <link href=\"{FONTS_HREF}\" rel=\"stylesheet\">
    <style>
        {custom_css}
        /* Reset for preview */
        {PREVIEW_RESET_CSS}
    </style>
</head>
<body>
    {body}
</body>
</html>
"
    )
}

/// Writes `markup` as a preview page named after `stem` and returns its path.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn write_preview_in(dir: &Path, stem: &str, markup: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create preview directory {}", dir.display()))?;
    let path = dir.join(format!("{}.html", file_stem(stem)));
    fs::write(&path, wrap_html(markup))
        .with_context(|| format!("Failed to write preview {}", path.display()))?;
    Ok(path)
}

/// Writes a preview under `${VAULT_HOME}/previews`.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn write_preview(stem: &str, markup: &str) -> Result<PathBuf> {
    write_preview_in(&paths::previews_dir(), stem, markup)
}

/// Writes a preview and opens it in the default browser.
///
/// # Errors
/// Returns an error if the page cannot be written or no opener is available.
pub fn open_preview(stem: &str, markup: &str) -> Result<PathBuf> {
    let path = write_preview(stem, markup)?;
    open::that(&path).with_context(|| format!("Failed to open {}", path.display()))?;
    tracing::info!(path = %path.display(), "preview opened");
    Ok(path)
}

/// Keeps ASCII alphanumerics, `-` and `_`; everything else becomes `-`.
fn file_stem(stem: &str) -> String {
    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "preview".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn wrap_html_embeds_config_css_and_body() {
        let page = wrap_html("<button class=\"btn-titanium\">OK</button>");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("tailwind.config = {\"theme\""));
        assert!(page.contains(".glass-panel {"));
        assert!(page.contains("/* Reset for preview */"));
        assert!(page.contains("    <button class=\"btn-titanium\">OK</button>\n</body>"));
        assert!(!page.contains("index.tsx"));
    }

    #[test]
    fn write_preview_sanitizes_name() {
        let dir = tempdir().unwrap();
        let path = write_preview_in(dir.path(), "a/b c", "<p>x</p>").unwrap();
        assert_eq!(path.file_name().unwrap(), "a-b-c.html");
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("<p>x</p>"));
    }

    #[test]
    fn empty_stem_falls_back() {
        assert_eq!(file_stem(""), "preview");
    }
}
