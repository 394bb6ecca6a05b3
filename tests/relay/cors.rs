use crate::harness::{FakeOutcome, RecordingAction, RelayTestServer};
use openclaw_send::transport::relay::{HEALTH_PATH, SEND_PATH};
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};

#[tokio::test]
async fn health_is_open_even_with_a_token() {
    let server = RelayTestServer::start("s3cret", RecordingAction::new(FakeOutcome::Succeed)).await;

    let response = reqwest::get(server.url(HEALTH_PATH)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"ok": true}));
}

#[tokio::test]
async fn preflight_short_circuits_with_no_content() {
    let action = RecordingAction::new(FakeOutcome::Succeed);
    let server = RelayTestServer::start("s3cret", action.clone()).await;

    let response = reqwest::Client::new()
        .request(Method::OPTIONS, server.url(SEND_PATH))
        .header("origin", "chrome-extension://abc")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(
        headers["access-control-allow-headers"],
        "Content-Type, Authorization"
    );
    assert_eq!(headers["access-control-allow-methods"], "POST, GET, OPTIONS");
    assert!(action.calls().is_empty());
}

#[tokio::test]
async fn error_responses_carry_cors_headers() {
    let server = RelayTestServer::start("s3cret", RecordingAction::new(FakeOutcome::Succeed)).await;

    let response = reqwest::Client::new()
        .post(server.url(SEND_PATH))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
