//! Component generation: prompt composition, the provider call, and markup cleanup.

use std::fmt;

use crate::config::GenerationConfig;
use crate::providers::gemini::{GeminiClient, GeminiConfig};

/// Alert shown for every generation failure; details go to the log.
pub const GENERATION_ALERT: &str = "Check API Key configuration.";

const STYLE_CONTRACT: &str = "Generate a UI component using Tailwind CSS with Custom i.AM Config.

SYSTEM TOKENS (MUST USE):
- BG: 'bg-bg-primary' (Black) or 'bg-bg-secondary' (Dark Grey)
- TEXT: 'text-main' (White) or 'text-text-muted' (Grey)
- BORDER: 'border-border-color' (White/12)
- PANEL: 'glass-panel' (Class for frosted glass backgrounds)
- BUTTON: 'btn-titanium' (Class for primary white buttons)

Style: Stark Black/White, Enterprise, Sharp Corners.";

/// Builds the full request text: the style/token contract followed by the user's prompt.
pub fn compose_prompt(prompt: &str) -> String {
    format!("{STYLE_CONTRACT}\nRequest: {prompt}.\nOutput ONLY raw HTML code. No markdown.")
}

/// Removes every literal "```html", then every remaining "```".
///
/// Nothing else is touched: no trimming and no markdown parsing.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```html", "").replace("```", "")
}

/// Whether the prompt carries anything worth sending.
pub fn is_submittable(prompt: &str) -> bool {
    !prompt.trim().is_empty()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Empty or whitespace-only prompt; nothing was sent.
    EmptyPrompt,
    /// No usable API key or base URL.
    Configuration(String),
    /// Transport, status, or response failure from the provider.
    Provider(String),
}

impl GenerationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerationError::EmptyPrompt => "Enter a prompt first.",
            GenerationError::Configuration(_) | GenerationError::Provider(_) => GENERATION_ALERT,
        }
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::EmptyPrompt => write!(f, "prompt is empty"),
            GenerationError::Configuration(detail) => {
                write!(f, "generation is not configured: {detail}")
            }
            GenerationError::Provider(detail) => write!(f, "generation failed: {detail}"),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Generation workflow phase as seen by a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenerationPhase {
    #[default]
    Idle,
    Generating,
}

/// Sends prompts to the configured model.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GenerationConfig,
}

impl Generator {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Generates markup for `prompt` with code fences stripped.
    ///
    /// Credentials are resolved per call so a key added to the environment or
    /// config is picked up without a restart.
    ///
    /// # Errors
    /// See [`GenerationError`]. The full detail is logged here.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        if !is_submittable(prompt) {
            return Err(GenerationError::EmptyPrompt);
        }

        let client = GeminiConfig::from_env(&self.config)
            .map(GeminiClient::new)
            .map_err(|e| {
                tracing::error!("Generation config error: {e:#}");
                GenerationError::Configuration(format!("{e:#}"))
            })?;

        tracing::info!(model = client.model(), "generating component");
        let raw = client
            .generate_text(&compose_prompt(prompt))
            .await
            .map_err(|e| {
                tracing::error!("Generation failed: {e:#}");
                GenerationError::Provider(format!("{e:#}"))
            })?;

        Ok(strip_code_fences(&raw))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn generator_for(server: &MockServer) -> Generator {
        Generator::new(GenerationConfig {
            api_key: Some("test-key".to_string()),
            base_url: Some(server.uri()),
            ..GenerationConfig::default()
        })
    }

    #[test]
    fn compose_prompt_embeds_request_after_contract() {
        let prompt = compose_prompt("a login button");
        assert!(prompt.starts_with(
            "Generate a UI component using Tailwind CSS with Custom i.AM Config.\n\nSYSTEM TOKENS (MUST USE):\n"
        ));
        assert!(prompt.contains("- BUTTON: 'btn-titanium' (Class for primary white buttons)\n"));
        assert!(prompt.ends_with(
            "Style: Stark Black/White, Enterprise, Sharp Corners.\nRequest: a login button.\nOutput ONLY raw HTML code. No markdown."
        ));
    }

    #[test]
    fn strip_code_fences_removes_literal_delimiters_only() {
        assert_eq!(
            strip_code_fences("```html<button>OK</button>```"),
            "<button>OK</button>"
        );
        assert_eq!(
            strip_code_fences("```html\n<div>x</div>\n```\n"),
            "\n<div>x</div>\n\n"
        );
        assert_eq!(strip_code_fences("```HTML<p/>```"), "HTML<p/>");
    }

    #[test]
    fn whitespace_prompt_is_not_submittable() {
        assert!(!is_submittable(""));
        assert!(!is_submittable(" \n\t"));
        assert!(is_submittable(" hero "));
    }

    #[tokio::test]
    async fn empty_prompt_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = generator_for(&server).generate("   ").await.unwrap_err();
        assert_eq!(err, GenerationError::EmptyPrompt);
    }

    #[tokio::test]
    async fn generate_strips_fences_from_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-3-flash-preview:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "```html<button>OK</button>```" }] }
                }]
            })))
            .mount(&server)
            .await;

        let markup = generator_for(&server)
            .generate("a login button")
            .await
            .unwrap();
        assert_eq!(markup, "<button>OK</button>");
    }

    #[tokio::test]
    async fn provider_failure_maps_to_alert() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = generator_for(&server).generate("hero").await.unwrap_err();
        assert!(matches!(err, GenerationError::Provider(_)));
        assert_eq!(err.user_message(), GENERATION_ALERT);
    }
}
