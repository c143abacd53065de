use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/models/gemini-3-flash-preview:generateContent";

fn text_response(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
    }))
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_prints_markup_without_fences() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(text_response("```html<button>OK</button>```"))
        .expect(1)
        .mount(&server)
        .await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("vault")
        .env("VAULT_HOME", home.path())
        .env("GEMINI_API_KEY", "test-key")
        .env("GEMINI_BASE_URL", server.uri())
        .args(["generate", "-p", "a login button"])
        .assert()
        .success()
        .stdout("<button>OK</button>\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_writes_out_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(text_response("<section>hero</section>"))
        .mount(&server)
        .await;
    let home = tempdir().unwrap();
    let out = home.path().join("hero.html");

    cargo_bin_cmd!("vault")
        .env("VAULT_HOME", home.path())
        .env("GEMINI_API_KEY", "test-key")
        .env("GEMINI_BASE_URL", server.uri())
        .args(["generate", "-p", "hero section", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "<section>hero</section>");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_provider_failure_shows_alert() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("vault")
        .env("VAULT_HOME", home.path())
        .env("GEMINI_API_KEY", "test-key")
        .env("GEMINI_BASE_URL", server.uri())
        .args(["generate", "-p", "a card"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Check API Key configuration."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blank_prompt_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(text_response("<div/>"))
        .expect(0)
        .mount(&server)
        .await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("vault")
        .env("VAULT_HOME", home.path())
        .env("GEMINI_API_KEY", "test-key")
        .env("GEMINI_BASE_URL", server.uri())
        .args(["generate", "-p", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Enter a prompt first."));
}

#[test]
fn test_generate_without_api_key_fails() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("vault")
        .env("VAULT_HOME", home.path())
        .env_remove("GEMINI_API_KEY")
        .args(["generate", "-p", "a card"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Check API Key configuration."));
}
