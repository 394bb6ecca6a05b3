use crate::harness::{FakeOutcome, RecordingAction, RelayTestServer};
use openclaw_send::config::{RelayConfig, WakeMode};
use openclaw_send::transport::relay::{MISSING_FIELDS, SEND_PATH};
use reqwest::StatusCode;
use serde_json::{Value, json};

fn valid_body() -> Value {
    json!({"url": "https://a", "title": "T", "content": "hello"})
}

async fn post(server: &RelayTestServer, token: Option<&str>, body: &Value) -> (StatusCode, Value) {
    let mut request = reqwest::Client::new().post(server.url(SEND_PATH)).json(body);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }
    let response = request.send().await.expect("relay should respond");
    let status = response.status();
    let body = response.json().await.expect("relay answers with JSON");
    (status, body)
}

#[tokio::test]
async fn valid_payload_wakes_assistant() {
    let action = RecordingAction::new(FakeOutcome::Succeed);
    let server = RelayTestServer::start("", action.clone()).await;

    let (status, body) = post(&server, None, &valid_body()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true}));

    let calls = action.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].0,
        "📎 Page sent from browser: T\nURL: https://a\n---\nhello"
    );
    assert_eq!(calls[0].1, WakeMode::Now);
}

#[tokio::test]
async fn configured_wake_mode_is_passed_through() {
    let action = RecordingAction::new(FakeOutcome::Succeed);
    let config = RelayConfig {
        wake_mode: WakeMode::NextHeartbeat,
        ..RelayConfig::default()
    };
    let server = RelayTestServer::start_with(config, action.clone()).await;

    let (status, _) = post(&server, None, &valid_body()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(action.calls()[0].1, WakeMode::NextHeartbeat);
}

#[tokio::test]
async fn missing_title_is_rejected() {
    let action = RecordingAction::new(FakeOutcome::Succeed);
    let server = RelayTestServer::start("", action.clone()).await;

    let (status, body) = post(&server, None, &json!({"url": "https://a", "content": "hello"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], MISSING_FIELDS);
    assert!(action.calls().is_empty());
}

#[tokio::test]
async fn selection_alone_satisfies_body_requirement() {
    let action = RecordingAction::new(FakeOutcome::Succeed);
    let server = RelayTestServer::start("", action.clone()).await;

    let body = json!({"url": "https://a", "title": "T", "content": "", "selection": "picked"});
    let (status, _) = post(&server, None, &body).await;
    assert_eq!(status, StatusCode::OK);
    assert!(action.calls()[0].0.ends_with("---\npicked"));
}

#[tokio::test]
async fn null_optional_fields_are_accepted() {
    let action = RecordingAction::new(FakeOutcome::Succeed);
    let server = RelayTestServer::start("", action.clone()).await;

    let body = json!({
        "url": "https://a",
        "title": "T",
        "content": "hello",
        "selection": null,
        "message": null,
        "timestamp": null
    });
    let (status, body) = post(&server, None, &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true}));
    assert_eq!(
        action.calls()[0].0,
        "📎 Page sent from browser: T\nURL: https://a\n---\nhello"
    );
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let server = RelayTestServer::start("", RecordingAction::new(FakeOutcome::Succeed)).await;

    let response = reqwest::Client::new()
        .post(server.url(SEND_PATH))
        .header("content-type", "application/json")
        .body("{\"url\":")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn wrong_or_missing_token_is_unauthorized() {
    let action = RecordingAction::new(FakeOutcome::Succeed);
    let server = RelayTestServer::start("s3cret", action.clone()).await;

    let (status, body) = post(&server, Some("wrong"), &valid_body()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"ok": false, "error": "Unauthorized"}));

    let (status, _) = post(&server, None, &valid_body()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post(&server, Some("s3cret"), &valid_body()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(action.calls().len(), 1);
}

#[tokio::test]
async fn auth_is_checked_before_validation() {
    let server = RelayTestServer::start("s3cret", RecordingAction::new(FakeOutcome::Succeed)).await;
    let (status, _) = post(&server, Some("wrong"), &json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_zero_exit_is_a_server_error() {
    let server = RelayTestServer::start("", RecordingAction::new(FakeOutcome::Exit(2))).await;

    let (status, body) = post(&server, None, &valid_body()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["ok"], false);
    assert!(
        body["error"].as_str().unwrap().ends_with("exited with 2"),
        "{body}"
    );
}

#[tokio::test]
async fn start_failure_reports_start_error() {
    let action = RecordingAction::new(FakeOutcome::FailToStart("spawn clawdbot ENOENT"));
    let server = RelayTestServer::start("", action).await;

    let (status, body) = post(&server, None, &valid_body()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"ok": false, "error": "spawn clawdbot ENOENT"}));
}
