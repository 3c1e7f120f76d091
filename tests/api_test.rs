use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use countdown_timer::{create_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> (Arc<AppState>, Router) {
    let state = Arc::new(AppState::new(20554, "127.0.0.1".to_string()).unwrap());
    let router = create_router(Arc::clone(&state));
    (state, router)
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn edit(router: &Router, field: &str, text: &str) -> (StatusCode, Value) {
    send(router, "PUT", &format!("/picker/{field}"), Some(json!({ "text": text }))).await
}

#[tokio::test]
async fn test_health() {
    let (_, router) = app();
    let (status, body) = send(&router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_picker_edit_outcomes() {
    let (_, router) = app();

    let (status, body) = edit(&router, "seconds", "30").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "accepted");
    assert_eq!(body["picker"]["seconds"]["value"], 30);
    assert_eq!(body["picker"]["candidate_seconds"], 30);

    let (_, body) = edit(&router, "minutes", "75").await;
    assert_eq!(body["outcome"], "rejected");
    assert_eq!(body["picker"]["minutes"]["value"], 0);

    edit(&router, "hours", "5").await;
    let (_, body) = edit(&router, "hours", "5x").await;
    assert_eq!(body["outcome"], "reset");
    assert_eq!(body["picker"]["hours"]["value"], 0);
    assert_eq!(body["picker"]["hours"]["display"], "00");
    assert_eq!(body["picker"]["hours"]["cursor"], 1);
}

#[tokio::test]
async fn test_picker_edit_keeps_cursor() {
    let (_, router) = app();
    let (_, body) = send(
        &router,
        "PUT",
        "/picker/minutes",
        Some(json!({ "text": "7", "cursor": 0 })),
    )
    .await;
    assert_eq!(body["picker"]["minutes"]["display"], "07");
    assert_eq!(body["picker"]["minutes"]["cursor"], 0);
}

#[tokio::test]
async fn test_unknown_field_is_client_error() {
    let (_, router) = app();
    let (status, _) = edit(&router, "days", "1").await;
    assert!(status.is_client_error());
}

#[tokio::test(start_paused = true)]
async fn test_start_cancel_cycle() {
    let (state, router) = app();
    edit(&router, "minutes", "1").await;
    edit(&router, "seconds", "30").await;

    let (status, body) = send(&router, "POST", "/timer/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["timer"]["total_seconds"], 90);
    assert_eq!(body["readout"], "00 : 01 : 30");

    // picker is locked while counting
    let (status, _) = edit(&router, "seconds", "10").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(&router, "GET", "/status", None).await;
    assert_eq!(body["timer"]["phase"], "running");
    assert_eq!(body["last_action"], "start");

    let (_, body) = send(&router, "POST", "/timer/cancel", None).await;
    assert_eq!(body["status"], "idle");
    assert_eq!(body["timer"]["progress"], 0.0);
    assert_eq!(body["timer"]["completion_pending"], false);
    assert!(!state.engine.completion_pending());

    // picker kept its values
    let (_, body) = send(&router, "GET", "/picker", None).await;
    assert_eq!(body["candidate_seconds"], 90);
}

#[tokio::test]
async fn test_zero_start_and_acknowledge() {
    let (_, router) = app();

    let (status, body) = send(&router, "POST", "/timer/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");
    assert_eq!(body["timer"]["completion_pending"], true);

    for _ in 0..2 {
        let (status, body) = send(&router, "POST", "/timer/acknowledge", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["completion_pending"], false);
    }
}
