use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use toolkit_llm::{CompletionRequest, CompletionService};
use toolkit_service::{app_module::AppState, app_router::build_app};
use tower::ServiceExt;

struct StubCompletion {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl StubCompletion {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionService for StubCompletion {
    async fn complete(&self, _request: CompletionRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .ok_or_else(|| anyhow!("You exceeded your current quota"))
    }
}

async fn post_transform(stub: Arc<StubCompletion>, body: String) -> (StatusCode, Value) {
    let app = build_app(AppState::new(stub));
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/transform")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn summarize_returns_transformed_text() {
    let stub = StubCompletion::replying("- point one\n- point two\n- point three");

    let (status, body) = post_transform(
        stub.clone(),
        json!({"text": "A long paragraph...", "transformationType": "summarize"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"transformed_text": "- point one\n- point two\n- point three"})
    );
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn reply_whitespace_is_trimmed() {
    let stub = StubCompletion::replying("\n  Good day to you.  \n");

    let (status, body) = post_transform(
        stub.clone(),
        json!({"text": "hey", "transformationType": "FORMAL"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transformed_text"], "Good day to you.");
}

#[tokio::test]
async fn unknown_type_is_a_client_error_without_upstream_call() {
    let stub = StubCompletion::replying("unused");

    let (status, body) = post_transform(
        stub.clone(),
        json!({"text": "hi", "transformationType": "klingon"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("klingon"));
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn missing_text_is_a_client_error_without_upstream_call() {
    let stub = StubCompletion::replying("unused");

    let (status, body) =
        post_transform(stub.clone(), json!({"transformationType": "casual"}).to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Missing 'text' or 'transformationType' in request"
    );
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn missing_or_null_fields_are_client_errors() {
    let bodies = [
        json!({"text": "hello"}),
        json!({"text": null, "transformationType": "casual"}),
        json!({"text": "hello", "transformationType": null}),
        json!({}),
    ];

    for request_body in bodies {
        let stub = StubCompletion::replying("unused");
        let (status, body) = post_transform(stub.clone(), request_body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", request_body);
        assert!(body["error"].is_string());
        assert_eq!(stub.calls(), 0);
    }
}

#[tokio::test]
async fn unparseable_body_reports_the_parse_failure() {
    let stub = StubCompletion::replying("unused");

    let (status, body) = post_transform(stub.clone(), "not json".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Failed to parse the request body as JSON"));
    assert!(!message.contains("Missing"));
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn wrongly_typed_field_reports_the_type_mismatch() {
    let stub = StubCompletion::replying("unused");

    let (status, body) = post_transform(
        stub.clone(),
        json!({"text": 5, "transformationType": "casual"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("invalid type"));
    assert!(!message.contains("Missing"));
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn completion_failure_is_reported_after_a_single_attempt() {
    let stub = StubCompletion::failing();

    let (status, body) = post_transform(
        stub.clone(),
        json!({"text": "hello world", "transformationType": "keywords"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let message = body["error"].as_str().unwrap();
    assert!(!message.is_empty());
    assert!(message.contains("You exceeded your current quota"));
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn other_routes_are_not_served() {
    let app = build_app(AppState::new(StubCompletion::replying("unused")));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/transform")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
