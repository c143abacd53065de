//! Identity Toolkit REST client (email/password accounts and token refresh).

use std::fmt;
use std::time::Duration;

use anyhow::Result;
use chrono::{TimeDelta, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;

use super::shared::{
    ProviderError, USER_AGENT, classify_reqwest_error, error_message, http_client,
    resolve_api_key, resolve_base_url,
};
use crate::config::IdentityConfig;
use crate::session::Session;

pub const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";
pub const API_KEY_ENV: &str = "VAULT_IDENTITY_API_KEY";
pub const BASE_URL_ENV: &str = "VAULT_IDENTITY_BASE_URL";
pub const TOKEN_URL_ENV: &str = "VAULT_TOKEN_BASE_URL";

/// Deadline for a single sign-in, sign-up or refresh call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Error codes the service returns for a wrong identity/secret pair.
const CREDENTIAL_CODES: &[&str] = &[
    "INVALID_PASSWORD",
    "EMAIL_NOT_FOUND",
    "INVALID_LOGIN_CREDENTIALS",
    "INVALID_EMAIL",
    "USER_DISABLED",
    "EMAIL_EXISTS",
    "WEAK_PASSWORD",
    "MISSING_PASSWORD",
    "INVALID_REFRESH_TOKEN",
    "TOKEN_EXPIRED",
    "USER_NOT_FOUND",
];

/// Why an identity request failed.
#[derive(Debug, Clone)]
pub enum IdentityError {
    /// The service rejected the credential; carries the service code.
    InvalidCredential(String),
    /// The request never produced a response.
    Network(ProviderError),
    /// Any other non-success response or malformed body.
    Service(ProviderError),
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityError::InvalidCredential(code) => write!(f, "Invalid credential ({code})"),
            IdentityError::Network(err) => write!(f, "Identity service unreachable: {err}"),
            IdentityError::Service(err) => write!(f, "Identity service error: {err}"),
        }
    }
}

impl std::error::Error for IdentityError {}

/// Identity endpoints resolved from config and environment.
#[derive(Debug, Clone)]
pub struct IdentityEndpoints {
    pub api_key: String,
    pub base_url: String,
    pub token_url: String,
}

impl IdentityEndpoints {
    /// Resolves endpoints from `[identity]` and the environment.
    ///
    /// API key: config > `VAULT_IDENTITY_API_KEY`.
    /// URLs: `VAULT_IDENTITY_BASE_URL` / `VAULT_TOKEN_BASE_URL` > config > default.
    ///
    /// # Errors
    /// Returns an error if no API key is available or a URL is malformed.
    pub fn from_env(config: &IdentityConfig) -> Result<Self> {
        let api_key = resolve_api_key(config.effective_api_key(), API_KEY_ENV, "identity")?;
        let base_url = resolve_base_url(
            config.effective_base_url(),
            BASE_URL_ENV,
            DEFAULT_BASE_URL,
            "identity",
        )?;
        let token_url = resolve_base_url(
            config.effective_token_url(),
            TOKEN_URL_ENV,
            DEFAULT_TOKEN_URL,
            "token",
        )?;
        Ok(Self {
            api_key,
            base_url,
            token_url,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    user_id: String,
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
}

/// Identity client.
#[derive(Clone)]
pub struct IdentityClient {
    endpoints: IdentityEndpoints,
    http: reqwest::Client,
}

impl IdentityClient {
    pub fn new(endpoints: IdentityEndpoints) -> Self {
        Self::with_timeout(endpoints, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(endpoints: IdentityEndpoints, timeout: Duration) -> Self {
        Self {
            endpoints,
            http: http_client(timeout),
        }
    }

    /// Exchanges an email/password pair for a session.
    ///
    /// # Errors
    /// See [`IdentityError`].
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, IdentityError> {
        self.account_request("accounts:signInWithPassword", email, password)
            .await
    }

    /// Creates a new email/password account and returns its first session.
    ///
    /// # Errors
    /// See [`IdentityError`].
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
        self.account_request("accounts:signUp", email, password)
            .await
    }

    /// Trades a refresh token for a fresh session.
    ///
    /// # Errors
    /// See [`IdentityError`].
    pub async fn refresh(&self, session: &Session) -> Result<Session, IdentityError> {
        let url = format!(
            "{}/token?key={}",
            self.endpoints.token_url, self.endpoints.api_key
        );
        let body = json!({
            "grant_type": "refresh_token",
            "refresh_token": session.refresh_token,
        });
        let text = self.post(&url, &body).await?;
        let parsed: RefreshResponse = serde_json::from_str(&text).map_err(|e| {
            IdentityError::Service(ProviderError::parse(format!(
                "Invalid token refresh response: {e}"
            )))
        })?;

        Ok(Session {
            user_id: parsed.user_id,
            email: session.email.clone(),
            id_token: parsed.id_token,
            refresh_token: parsed.refresh_token,
            expires_at: expiry_from(parsed.expires_in.as_deref()),
        })
    }

    async fn account_request(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, IdentityError> {
        let url = format!(
            "{}/{endpoint}?key={}",
            self.endpoints.base_url, self.endpoints.api_key
        );
        let body = json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        let text = self.post(&url, &body).await?;
        let parsed: AccountResponse = serde_json::from_str(&text).map_err(|e| {
            IdentityError::Service(ProviderError::parse(format!(
                "Invalid {endpoint} response: {e}"
            )))
        })?;

        Ok(Session {
            user_id: parsed.local_id,
            email: parsed.email.unwrap_or_else(|| email.to_string()),
            id_token: parsed.id_token,
            refresh_token: parsed.refresh_token,
            expires_at: expiry_from(parsed.expires_in.as_deref()),
        })
    }

    async fn post(&self, url: &str, body: &serde_json::Value) -> Result<String, IdentityError> {
        let response = self
            .http
            .post(url)
            .headers(build_headers())
            .json(body)
            .send()
            .await
            .map_err(|e| IdentityError::Network(classify_reqwest_error(&e)))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if status.is_success() {
            return Ok(text);
        }
        Err(classify_failure(status.as_u16(), &text))
    }
}

/// Maps a non-success response to a credential or service error.
fn classify_failure(status: u16, body: &str) -> IdentityError {
    if let Some(message) = error_message(body) {
        // Codes may carry a suffix such as "WEAK_PASSWORD : Password should be ...".
        let code = message
            .split(':')
            .next()
            .map_or_else(String::new, |c| c.trim().to_string());
        if CREDENTIAL_CODES.contains(&code.as_str()) {
            return IdentityError::InvalidCredential(code);
        }
    }
    IdentityError::Service(ProviderError::http_status(status, body))
}

fn expiry_from(expires_in: Option<&str>) -> Option<chrono::DateTime<Utc>> {
    let secs: i64 = expires_in?.trim().parse().ok()?;
    Some(Utc::now() + TimeDelta::seconds(secs))
}

fn build_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("accept", HeaderValue::from_static("application/json"));
    headers.insert("content-type", HeaderValue::from_static("application/json"));
    headers.insert("user-agent", HeaderValue::from_static(USER_AGENT));
    headers
}
