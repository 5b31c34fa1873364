//! Integration tests for GeminiProvider
//!
//! These tests use mockito to stand in for the Gemini REST endpoint.

use mockito::{Matcher, Server};
use sentinel_llm::{GeminiProvider, LLMClient, LLMError, LLMRequest};
use serde_json::json;

const MODEL: &str = "gemini-2.5-flash";

fn path_matcher() -> Matcher {
    Matcher::Regex(r"^/models/gemini-2\.5-flash:generateContent".to_string())
}

fn analysis_request() -> LLMRequest {
    LLMRequest::new("Analyze transaction tx_1".to_string(), MODEL.to_string())
        .with_temperature(0.1)
        .with_json_schema(json!({"type": "OBJECT"}))
}

#[tokio::test]
async fn test_successful_generate_content() {
    let mut server = Server::new_async().await;
    let body = json!({
        "candidates": [{
            "content": {"parts": [{"text": "{\"riskScore\": 12}"}], "role": "model"},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"totalTokenCount": 321}
    });

    let mock = server
        .mock("POST", path_matcher())
        .match_query(Matcher::UrlEncoded("key".to_string(), "test-key".to_string()))
        .match_body(Matcher::PartialJson(json!({
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {"type": "OBJECT"}
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let provider = GeminiProvider::new("test-key".to_string()).with_base_url(server.url());
    let response = provider.call(analysis_request()).await.unwrap();

    assert_eq!(response.content, "{\"riskScore\": 12}");
    assert_eq!(response.model, MODEL);
    assert_eq!(response.tokens_used, 321);
    assert_eq!(response.finish_reason, "STOP");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_is_api_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", path_matcher())
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("overloaded")
        .create_async()
        .await;

    let provider = GeminiProvider::new("test-key".to_string()).with_base_url(server.url());
    let err = provider.call(analysis_request()).await.unwrap_err();

    match err {
        LLMError::ApiCallFailed(msg) => {
            assert!(msg.contains("503"));
            assert!(msg.contains("overloaded"));
        }
        other => panic!("Expected ApiCallFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_candidates_is_invalid_response() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", path_matcher())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"candidates": []}).to_string())
        .create_async()
        .await;

    let provider = GeminiProvider::new("test-key".to_string()).with_base_url(server.url());
    let err = provider.call(analysis_request()).await.unwrap_err();

    assert!(matches!(err, LLMError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", path_matcher())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let provider = GeminiProvider::new("test-key".to_string()).with_base_url(server.url());
    let err = provider.call(analysis_request()).await.unwrap_err();

    assert!(matches!(err, LLMError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_api_failure() {
    // Port 9 (discard) is not expected to accept HTTP connections
    let provider =
        GeminiProvider::new("test-key".to_string()).with_base_url("http://127.0.0.1:9");
    let err = provider.call(analysis_request()).await.unwrap_err();

    assert!(matches!(err, LLMError::ApiCallFailed(_)));
}
