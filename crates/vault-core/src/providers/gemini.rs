//! Gemini API key provider (Generative Language API).

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{Value, json};

use super::shared::{
    ProviderError, ProviderResult, USER_AGENT, classify_reqwest_error, http_client,
    resolve_api_key, resolve_base_url,
};
use crate::config::GenerationConfig;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";

/// Deadline for one generation call; large components take a while.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Gemini API configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl GeminiConfig {
    /// Creates a new config from the `[generation]` section and environment.
    ///
    /// Authentication resolution order:
    /// 1. `api_key` in `[generation]`
    /// 2. `GEMINI_API_KEY` environment variable
    ///
    /// `GEMINI_BASE_URL` overrides the configured base URL.
    ///
    /// # Errors
    /// Returns an error if no API key is available or the base URL is malformed.
    pub fn from_env(config: &GenerationConfig) -> Result<Self> {
        let api_key = resolve_api_key(config.effective_api_key(), API_KEY_ENV, "generation")?;
        let base_url = resolve_base_url(
            config.effective_base_url(),
            BASE_URL_ENV,
            DEFAULT_BASE_URL,
            "Gemini",
        )?;

        Ok(Self {
            api_key,
            base_url,
            model: config.model.clone(),
        })
    }
}

/// Gemini client.
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: http_client(REQUEST_TIMEOUT),
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Sends a single-turn prompt and returns the concatenated response text.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] for transport failures, non-2xx statuses,
    /// blocked prompts and responses without text.
    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        let request = build_text_request(prompt);
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let response = self
            .http
            .post(url)
            .headers(build_headers(&self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ProviderError::http_status(status.as_u16(), &body).into());
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderError::parse(format!("Invalid Gemini response JSON: {e}")))
            .with_context(|| format!("Unexpected body from {}", self.config.model))?;
        Ok(parse_text_response(&value)?)
    }
}

fn build_text_request(prompt: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }]
        }]
    })
}

fn parse_text_response(value: &Value) -> ProviderResult<String> {
    if let Some(reason) = value
        .get("promptFeedback")
        .and_then(|feedback| feedback.get("blockReason"))
        .and_then(Value::as_str)
    {
        return Err(ProviderError::api_error("blocked", reason));
    }

    let text: String = value
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(ProviderError::parse("Gemini response contained no text"));
    }
    Ok(text)
}

fn build_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "x-goog-api-key",
        HeaderValue::from_str(api_key).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    headers.insert("accept", HeaderValue::from_static("application/json"));
    headers.insert("content-type", HeaderValue::from_static("application/json"));
    headers.insert("user-agent", HeaderValue::from_static(USER_AGENT));
    headers
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::providers::ProviderErrorKind;

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(GeminiConfig {
            api_key: "test-key".to_string(),
            base_url: server.uri(),
            model: "gemini-3-flash-preview".to_string(),
        })
    }

    #[test]
    fn parse_text_response_joins_parts_of_first_candidate() {
        let value = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "<div>" }, { "text": "</div>" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        });
        assert_eq!(parse_text_response(&value).unwrap(), "<div></div>");
    }

    #[test]
    fn parse_text_response_reports_block_reason() {
        let value = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        let err = parse_text_response(&value).unwrap_err();
        assert_eq!(err.kind, ProviderErrorKind::ApiError);
        assert!(err.message.contains("SAFETY"));
    }

    #[test]
    fn parse_text_response_rejects_empty_candidates() {
        let err = parse_text_response(&json!({ "candidates": [] })).unwrap_err();
        assert_eq!(err.kind, ProviderErrorKind::Parse);
    }

    #[tokio::test]
    async fn generate_text_posts_prompt_with_api_key_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-3-flash-preview:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "<p>hi</p>" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server).generate_text("hello").await.unwrap();
        assert_eq!(text, "<p>hi</p>");
    }

    #[tokio::test]
    async fn generate_text_surfaces_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "code": 403, "message": "API key not valid" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).generate_text("hello").await.unwrap_err();
        let provider = err.downcast_ref::<ProviderError>().unwrap();
        assert_eq!(provider.message, "HTTP 403: API key not valid");
    }
}
