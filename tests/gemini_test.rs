//! Wiremock integration tests for the Gemini scorer.
//!
//! Covers setup validation (model list, credentials) and per-sentence
//! classification, including unusable replies and API failures.

use sentimentsync::{
    GeminiClient, GeminiConfig, Method, SentimentLabel, SentimentScorer, SentimentSyncError,
};

use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-1.5-flash";

fn client(server: &MockServer, api_key: &str, model: &str) -> GeminiClient {
    GeminiClient::new(GeminiConfig::new(api_key, model).base_url(server.uri())).unwrap()
}

fn models_json(names: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "models": names
            .iter()
            .map(|n| serde_json::json!({ "name": format!("models/{n}") }))
            .collect::<Vec<_>>()
    })
}

fn reply_json(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }]
    })
}

async fn mount_models(server: &MockServer, names: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(models_json(names)))
        .mount(server)
        .await;
}

async fn mount_reply(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{MODEL}:generateContent")))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(template)
        .mount(server)
        .await;
}

// ============================================================================
// Setup validation
// ============================================================================

#[tokio::test]
async fn list_models_strips_prefix() {
    let server = MockServer::start().await;
    mount_models(&server, &["gemini-1.5-flash", "gemini-pro"]).await;

    let names = client(&server, "test-key", MODEL).list_models().await.unwrap();
    assert_eq!(names, vec!["gemini-1.5-flash", "gemini-pro"]);
}

#[tokio::test]
async fn list_models_follows_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(models_json(&["gemini-pro"])))
        .with_priority(1)
        .mount(&server)
        .await;

    let mut first = models_json(&["gemini-1.5-flash"]);
    first["nextPageToken"] = serde_json::json!("page-2");
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(first))
        .with_priority(2)
        .mount(&server)
        .await;

    let names = client(&server, "test-key", MODEL).list_models().await.unwrap();
    assert_eq!(names, vec!["gemini-1.5-flash", "gemini-pro"]);
}

#[tokio::test]
async fn validate_accepts_listed_model() {
    let server = MockServer::start().await;
    mount_models(&server, &["gemini-1.5-flash"]).await;

    client(&server, "test-key", MODEL).validate().await.unwrap();
}

#[tokio::test]
async fn validate_rejects_unlisted_model() {
    let server = MockServer::start().await;
    mount_models(&server, &["gemini-1.5-flash", "gemini-pro"]).await;

    let err = client(&server, "test-key", "gemini-ultra")
        .validate()
        .await
        .unwrap_err();
    assert!(err.is_setup_error());
    let msg = err.to_string();
    assert!(msg.contains("'gemini-ultra' is not a valid model"), "{msg}");
    assert!(msg.contains("gemini-1.5-flash, gemini-pro"), "{msg}");
}

#[tokio::test]
async fn validate_rejects_missing_key_without_calling_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server, "  ", MODEL).validate().await.unwrap_err();
    assert!(matches!(err, SentimentSyncError::MissingCredential(Method::Gemini)));
}

#[tokio::test]
async fn validate_maps_bad_key_to_authentication_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .mount(&server)
        .await;

    let err = client(&server, "bad-key", MODEL).validate().await.unwrap_err();
    assert!(matches!(err, SentimentSyncError::AuthenticationFailed));
    assert!(err.is_setup_error());
}

#[tokio::test]
async fn validate_wraps_listing_failure_as_setup_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let err = client(&server, "test-key", MODEL).validate().await.unwrap_err();
    assert!(matches!(err, SentimentSyncError::Setup { method: Method::Gemini, .. }));
    assert!(err.to_string().contains("Failed to fetch Gemini model list"));
}

// ============================================================================
// Scoring
// ============================================================================

#[tokio::test]
async fn score_parses_fenced_json_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{MODEL}:generateContent")))
        .and(body_string_contains("I love this!"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_json(
            "```json\n{\"sentiment\": \"POSITIVE\", \"score\": 0.9}\n```",
        )))
        .mount(&server)
        .await;

    let score = client(&server, "test-key", MODEL)
        .score("I love this!")
        .await
        .unwrap();
    assert_eq!(score.label, SentimentLabel::Positive);
    // exp(0.9 * 5) - 1
    assert_eq!(score.intensity, 89.017);
}

#[tokio::test]
async fn unusable_reply_scores_neutral() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(reply_json("I cannot classify that.")),
    )
    .await;

    let score = client(&server, "test-key", MODEL)
        .score("???")
        .await
        .unwrap();
    assert_eq!(score.label, SentimentLabel::Neutral);
    assert_eq!(score.intensity, 0.0);
}

#[tokio::test]
async fn no_candidates_scores_neutral() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
    )
    .await;

    let score = client(&server, "test-key", MODEL).score("hi").await.unwrap();
    assert_eq!(score.label, SentimentLabel::Neutral);
}

#[tokio::test]
async fn server_error_is_returned_as_call_error() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": { "code": 500, "message": "internal", "status": "INTERNAL" }
        })),
    )
    .await;

    let err = client(&server, "test-key", MODEL)
        .score("hi")
        .await
        .unwrap_err();
    assert!(matches!(err, SentimentSyncError::Api { status: 500, .. }));
    assert!(!err.is_setup_error());
    assert!(err.to_string().contains("Gemini API error: internal"));
}
