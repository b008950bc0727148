//! Mock HTTP tests for EnhanceClient.
//!
//! These tests cover:
//! - Request formatting (endpoint, key header, body)
//! - Sanitization of input and output
//! - Error mapping for non-success statuses and bad payloads
//! - One request per call, no retries

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use meme_ascii::enhance::{EnhanceClient, EnhanceError, DEFAULT_MODEL};

const ENDPOINT: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn client_for(server: &MockServer) -> EnhanceClient {
    EnhanceClient::with_api_key("test-api-key".to_string())
        .unwrap()
        .with_base_url(server.uri())
}

/// Generator response whose text part holds `payload` serialized as JSON.
fn generator_reply(payload: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"text": payload.to_string()}]
            }
        }]
    }))
}

#[test]
fn test_default_model_matches_endpoint() {
    assert_eq!(
        ENDPOINT,
        format!("/v1beta/models/{}:generateContent", DEFAULT_MODEL)
    );
}

#[tokio::test]
async fn test_enhance_returns_generated_art() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-api-key"))
        .and(header("Content-Type", "application/json"))
        .respond_with(generator_reply(
            serde_json::json!({"enhancedAsciiArt": " @@ \n@  @\n LOL"}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let art = client_for(&server).enhance(" @@ \n@  @").await.unwrap();
    assert_eq!(art, " @@ \n@  @\n LOL");
}

#[tokio::test]
async fn test_enhance_sanitizes_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_partial_json(serde_json::json!({
            "contents": [{"parts": [{"text": "ASCII Art:\n\n@ @\n███"}]}],
            "generationConfig": {"responseMimeType": "application/json"}
        })))
        .respond_with(generator_reply(serde_json::json!({"enhancedAsciiArt": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let art = client_for(&server).enhance("@😀@\n███").await.unwrap();
    assert_eq!(art, "ok");
}

#[tokio::test]
async fn test_enhance_sanitizes_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(generator_reply(
            serde_json::json!({"enhancedAsciiArt": "much wow 🐕\n▒▒▀▒\ttab"}),
        ))
        .mount(&server)
        .await;

    let art = client_for(&server).enhance("@@").await.unwrap();
    assert_eq!(art, "much wow  \n▒▒ ▒ tab");
}

#[tokio::test]
async fn test_custom_model_changes_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/other-model:generateContent"))
        .respond_with(generator_reply(serde_json::json!({"enhancedAsciiArt": "@"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).with_model("other-model");
    assert_eq!(client.enhance(".").await.unwrap(), "@");
}

#[tokio::test]
async fn test_rate_limit_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "30")
                .set_body_string("slow down"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).enhance("@@").await;
    match result {
        Err(EnhanceError::RateLimit {
            message,
            retry_after_secs,
        }) => {
            assert_eq!(message, "slow down");
            assert_eq!(retry_after_secs, Some(30));
        }
        other => panic!("expected RateLimit, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).enhance("@@").await;
    match result {
        Err(EnhanceError::ApiError(message)) => {
            assert!(message.contains("500"));
            assert!(message.contains("boom"));
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_no_candidates_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})))
        .mount(&server)
        .await;

    let result = client_for(&server).enhance("@@").await;
    assert!(matches!(result, Err(EnhanceError::EmptyResponse)));
}

#[tokio::test]
async fn test_missing_field_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(generator_reply(serde_json::json!({"somethingElse": "x"})))
        .mount(&server)
        .await;

    let result = client_for(&server).enhance("@@").await;
    assert!(matches!(result, Err(EnhanceError::EmptyResponse)));
}

#[tokio::test]
async fn test_blank_output_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(generator_reply(serde_json::json!({"enhancedAsciiArt": "  \n "})))
        .mount(&server)
        .await;

    let result = client_for(&server).enhance("@@").await;
    assert!(matches!(result, Err(EnhanceError::EmptyResponse)));
}

#[tokio::test]
async fn test_non_json_text_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "here is your meme!"}]}}]
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).enhance("@@").await;
    assert!(matches!(result, Err(EnhanceError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_blank_input_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(generator_reply(serde_json::json!({"enhancedAsciiArt": "@"})))
        .expect(0)
        .mount(&server)
        .await;

    let result = client_for(&server).enhance("   \n  ").await;
    assert!(matches!(result, Err(EnhanceError::EmptyInput)));
}
