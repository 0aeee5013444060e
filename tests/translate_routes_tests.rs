mod common;

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use common::{FakeCompletionApi, Harness, HarnessOptions, send};
use serde_json::json;
use tlumacz::config::PromptFallback;
use tlumacz::db::{NewFeedback, NewRule};
use tlumacz::router::translator_router;
use tower::ServiceExt;

#[tokio::test]
async fn root_returns_greeting() {
    let api = FakeCompletionApi::replying("unused").await;
    let h = Harness::build(HarnessOptions::new("root", api.base.clone())).await;
    let app = translator_router(h.state.clone());

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn translate_sends_assembled_prompt_and_returns_text_unchanged() {
    let api = FakeCompletionApi::replying("Cześć").await;
    let h = Harness::build(HarnessOptions::new("translate-ok", api.base.clone())).await;
    h.storage()
        .add_rule(NewRule {
            case: "C1".into(),
            instruction: "I1".into(),
        })
        .await
        .unwrap();
    let app = translator_router(h.state.clone());

    let (status, body) = send(&app, "POST", "/translate", Some(json!({"text": "Hallo"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"translation": "Cześć"}));

    assert_eq!(
        api.last_payload().as_deref(),
        Some("Translate: HalloDodatkowe zasady, których należy przestrzegać:\nSprawa 1: C1 -> I1\nNoted Feedbacks:")
    );
    let req = api.last_request().unwrap();
    assert_eq!(req["model"], "gpt-4o");
    assert_eq!(req["messages"][0]["role"], "user");
    assert_eq!(req["messages"][0]["content"][0]["type"], "text");
}

#[tokio::test]
async fn empty_text_is_forwarded() {
    let api = FakeCompletionApi::replying("").await;
    let h = Harness::build(HarnessOptions::new("translate-empty", api.base.clone())).await;
    h.storage()
        .add_feedback(NewFeedback {
            feedback: "Pisz w formie ciągłej".into(),
        })
        .await
        .unwrap();
    let app = translator_router(h.state.clone());

    let (status, body) = send(&app, "POST", "/translate", Some(json!({"text": ""}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translation"], "");
    assert_eq!(
        api.last_payload().as_deref(),
        Some("Translate: Dodatkowe zasady, których należy przestrzegać:\nNoted Feedbacks:Sprawa 1: Pisz w formie ciągłej\n")
    );
}

#[tokio::test]
async fn missing_store_answers_service_unavailable() {
    let api = FakeCompletionApi::replying("unused").await;
    let mut opts = HarnessOptions::new("translate-nostore", api.base.clone());
    opts.with_store = false;
    let h = Harness::build(opts).await;
    let app = translator_router(h.state.clone());

    let (status, body) = send(&app, "POST", "/translate", Some(json!({"text": "Hallo"}))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "STORE_UNAVAILABLE");
    assert!(api.last_request().is_none());
}

#[tokio::test]
async fn missing_template_fails_request_by_default() {
    let api = FakeCompletionApi::replying("unused").await;
    let mut opts = HarnessOptions::new("translate-notemplate", api.base.clone());
    opts.prompt = None;
    let h = Harness::build(opts).await;
    let app = translator_router(h.state.clone());

    let (status, body) = send(&app, "POST", "/translate", Some(json!({"text": "Hallo"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "TEMPLATE_UNAVAILABLE");
    assert!(api.last_request().is_none());
}

#[tokio::test]
async fn diagnostic_fallback_embeds_read_error_in_prompt() {
    let api = FakeCompletionApi::replying("ok").await;
    let mut opts = HarnessOptions::new("translate-diag", api.base.clone());
    opts.prompt = None;
    opts.fallback = PromptFallback::Diagnostic;
    let h = Harness::build(opts).await;
    let app = translator_router(h.state.clone());

    let (status, _) = send(&app, "POST", "/translate", Some(json!({"text": "Hallo"}))).await;
    assert_eq!(status, StatusCode::OK);
    let expected_prefix = format!("The file {} does not exist.Hallo", h.prompt_path.display());
    assert!(api.last_payload().unwrap().starts_with(&expected_prefix));
}

#[tokio::test]
async fn upstream_rate_limit_is_reported() {
    let api = FakeCompletionApi::spawn(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": {"message": "Rate limit reached", "type": "requests"}}),
    )
    .await;
    let h = Harness::build(HarnessOptions::new("translate-429", api.base.clone())).await;
    let app = translator_router(h.state.clone());

    let (status, body) = send(&app, "POST", "/translate", Some(json!({"text": "Hallo"}))).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"]["code"], "RATE_LIMIT");
    assert_eq!(body["error"]["message"], "Rate limit reached");
}

#[tokio::test]
async fn completion_without_choices_is_bad_gateway() {
    let api = FakeCompletionApi::spawn(StatusCode::OK, json!({"choices": []})).await;
    let h = Harness::build(HarnessOptions::new("translate-nochoice", api.base.clone())).await;
    let app = translator_router(h.state.clone());

    let (status, body) = send(&app, "POST", "/translate", Some(json!({"text": "Hallo"}))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "MALFORMED_COMPLETION");
}

#[tokio::test]
async fn malformed_body_is_structured_client_error() {
    let api = FakeCompletionApi::replying("unused").await;
    let h = Harness::build(HarnessOptions::new("translate-badjson", api.base.clone())).await;
    let app = translator_router(h.state.clone());

    let (status, body) = send(&app, "POST", "/translate", Some(json!({"txt": "Hallo"}))).await;
    assert!(status.is_client_error());
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn oversized_body_returns_413() {
    let api = FakeCompletionApi::replying("unused").await;
    let mut opts = HarnessOptions::new("translate-413", api.base.clone());
    opts.max_body_bytes = 64;
    let h = Harness::build(opts).await;
    let app = translator_router(h.state.clone());

    let payload = format!(r#"{{"text":"{}"}}"#, "a".repeat(1024));
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/translate")
                .header("content-type", "application/json")
                .body(Body::from(payload))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body_str = std::str::from_utf8(&body).expect("response body was not utf-8");
    assert!(body_str.contains(r#""code":"PAYLOAD_TOO_LARGE""#));
    assert!(api.last_request().is_none());
}
