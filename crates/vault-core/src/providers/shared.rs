//! Types and helpers shared by the identity and generation backends.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;

/// User-Agent sent with every backend request.
pub const USER_AGENT: &str = concat!("vault/", env!("CARGO_PKG_VERSION"));

/// Limit for establishing a connection; the request deadline is per backend.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client that gives up on a request after `timeout`.
pub fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Falling back to an HTTP client without timeouts: {e}");
            reqwest::Client::new()
        })
}

/// Trimmed value, or `None` when blank.
fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Picks the API key from `[config_section].api_key`, then from `env_var`.
///
/// # Errors
/// Returns an error naming both places when neither holds a key.
pub fn resolve_api_key(
    config_api_key: Option<&str>,
    env_var: &str,
    config_section: &str,
) -> Result<String> {
    let from_env = std::env::var(env_var).ok();
    config_api_key
        .and_then(non_blank)
        .or_else(|| from_env.as_deref().and_then(non_blank))
        .map(str::to_string)
        .ok_or_else(|| {
            anyhow!("No API key available. Set {env_var} or api_key in [{config_section}].")
        })
}

/// Picks the base URL from `env_var`, then config, then `default_url`.
/// Trailing slashes are dropped.
///
/// # Errors
/// Returns an error if the chosen override does not parse as a URL.
pub fn resolve_base_url(
    config_base_url: Option<&str>,
    env_var: &str,
    default_url: &str,
    provider_name: &str,
) -> Result<String> {
    let from_env = std::env::var(env_var).ok();
    let Some(chosen) = from_env
        .as_deref()
        .and_then(non_blank)
        .or_else(|| config_base_url.and_then(non_blank))
    else {
        return Ok(default_url.to_string());
    };

    url::Url::parse(chosen)
        .with_context(|| format!("Invalid {provider_name} base URL: {chosen}"))?;
    Ok(chosen.trim_end_matches('/').to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Non-success HTTP status, or a request that could not be built.
    HttpStatus,
    /// No response: connect failure or timeout.
    Timeout,
    /// Response body was not what the backend promised.
    Parse,
    /// The backend answered but refused the request (e.g. a blocked prompt).
    ApiError,
}

impl ProviderErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            ProviderErrorKind::HttpStatus => "http_status",
            ProviderErrorKind::Timeout => "timeout",
            ProviderErrorKind::Parse => "parse",
            ProviderErrorKind::ApiError => "api_error",
        }
    }
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a backend call. `message` is one line; `details` keeps the raw body.
#[derive(Debug, Clone)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
    pub details: Option<String>,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Status error; a Google-style `error.message` in the body is appended.
    pub fn http_status(status: u16, body: &str) -> Self {
        let message = match error_message(body) {
            Some(reason) => format!("HTTP {status}: {reason}"),
            None => format!("HTTP {status}"),
        };
        Self {
            details: (!body.is_empty()).then(|| body.to_string()),
            ..Self::new(ProviderErrorKind::HttpStatus, message)
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Timeout, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Parse, message)
    }

    pub fn api_error(error_type: &str, message: &str) -> Self {
        Self::new(ProviderErrorKind::ApiError, format!("{error_type}: {message}"))
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ProviderError {}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// `error.message` of a Google API error body.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json.pointer("/error/message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Maps a transport failure onto the error kinds above.
pub fn classify_reqwest_error(e: &reqwest::Error) -> ProviderError {
    match (e.is_timeout(), e.is_connect(), e.is_request()) {
        (true, _, _) => ProviderError::timeout(format!("Request timed out: {e}")),
        (_, true, _) => ProviderError::timeout(format!("Connection failed: {e}")),
        (_, _, true) => {
            ProviderError::new(ProviderErrorKind::HttpStatus, format!("Request error: {e}"))
        }
        _ => ProviderError::new(ProviderErrorKind::HttpStatus, format!("Network error: {e}")),
    }
}
