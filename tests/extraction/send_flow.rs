use crate::harness::{FakeOutcome, RecordingAction, RelayTestServer};
use openclaw_send::config::Settings;
use openclaw_send::delivery::{DeliveryClient, SendOutcome, SendRequest, send_page, status_text};
use openclaw_send::extract::{HttpTab, Tab};
use openclaw_send::transport::relay::SEND_PATH;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn page_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/post"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><head><title>Launch Day</title></head>\
             <body><nav>Home</nav><p>We shipped it.</p></body></html>",
        ))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn page_travels_from_tab_to_wake_action() {
    let pages = page_server().await;
    let action = RecordingAction::new(FakeOutcome::Succeed);
    let relay = RelayTestServer::start("tok", action.clone()).await;

    let settings = Settings {
        webhook_url: relay.url(SEND_PATH),
        auth_token: "tok".into(),
        display_name: "Desk Bot".into(),
    };
    let tab = HttpTab::new(Url::parse(&format!("{}/post", pages.uri())).unwrap());
    let request = SendRequest {
        message: "  worth a look ".into(),
        selection_override: Some("We shipped".into()),
        ..SendRequest::default()
    };

    let outcome = send_page(Some(&tab as &dyn Tab), &settings, &DeliveryClient::new(), &request).await;
    assert_eq!(
        outcome.as_ref().unwrap(),
        &SendOutcome::Sent {
            display_name: "Desk Bot".into()
        }
    );
    assert_eq!(status_text(&outcome), "Sent to Desk Bot.");

    let calls = action.calls();
    assert_eq!(calls.len(), 1);
    let digest = &calls[0].0;
    assert!(digest.starts_with("📎 Page sent from browser: Launch Day\nURL: http://"));
    assert!(digest.contains("\nTime: "));
    assert!(digest.contains("\nworth a look\n---\n"));
    assert!(digest.ends_with("---\nWe shipped"));
}

#[tokio::test]
async fn wrong_token_surfaces_as_send_failure() {
    let pages = page_server().await;
    let action = RecordingAction::new(FakeOutcome::Succeed);
    let relay = RelayTestServer::start("tok", action.clone()).await;

    let settings = Settings {
        webhook_url: relay.url(SEND_PATH),
        auth_token: "nope".into(),
        ..Settings::default()
    };
    let tab = HttpTab::new(Url::parse(&format!("{}/post", pages.uri())).unwrap());

    let outcome = send_page(
        Some(&tab as &dyn Tab),
        &settings,
        &DeliveryClient::new(),
        &SendRequest::default(),
    )
    .await;
    assert_eq!(status_text(&outcome), "Failed to send. Check webhook URL/token.");
    assert!(outcome.unwrap_err().to_string().contains("401"));
    assert!(action.calls().is_empty());
}

#[tokio::test]
async fn failing_action_surfaces_as_send_failure() {
    let pages = page_server().await;
    let relay = RelayTestServer::start("", RecordingAction::new(FakeOutcome::Exit(2))).await;

    let settings = Settings {
        webhook_url: relay.url(SEND_PATH),
        ..Settings::default()
    };
    let tab = HttpTab::new(Url::parse(&format!("{}/post", pages.uri())).unwrap());

    let outcome = send_page(
        Some(&tab as &dyn Tab),
        &settings,
        &DeliveryClient::new(),
        &SendRequest::default(),
    )
    .await;
    assert!(outcome.unwrap_err().to_string().contains("500"));
}
