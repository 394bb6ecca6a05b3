#![allow(dead_code)]

use openclaw_send::config::{RelayConfig, WakeMode};
use openclaw_send::error::ActionError;
use openclaw_send::transport::relay::{
    ActionFuture, RelayState, WakeAction, run_relay_with_listener,
};
use reqwest::StatusCode;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the fake wake action does when invoked.
#[derive(Debug, Clone, Copy)]
pub enum FakeOutcome {
    Succeed,
    Exit(i32),
    FailToStart(&'static str),
}

/// Records every invocation instead of spawning a process.
pub struct RecordingAction {
    outcome: FakeOutcome,
    calls: Mutex<Vec<(String, WakeMode)>>,
}

impl RecordingAction {
    pub fn new(outcome: FakeOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, WakeMode)> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl WakeAction for RecordingAction {
    fn program(&self) -> &str {
        "clawdbot"
    }

    fn invoke<'a>(&'a self, text: &'a str, mode: WakeMode) -> ActionFuture<'a> {
        Box::pin(async move {
            self.calls
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push((text.to_string(), mode));
            match self.outcome {
                FakeOutcome::Succeed => Ok(()),
                FakeOutcome::Exit(code) => Err(ActionError::ExitCode {
                    program: self.program().to_string(),
                    code,
                }),
                FakeOutcome::FailToStart(message) => Err(ActionError::StartFailed(message.into())),
            }
        })
    }
}

pub struct RelayTestServer {
    port: u16,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl RelayTestServer {
    pub async fn start(token: &str, action: Arc<dyn WakeAction>) -> Self {
        Self::start_with(
            RelayConfig {
                webhook_token: token.to_string(),
                ..RelayConfig::default()
            },
            action,
        )
        .await
    }

    pub async fn start_with(config: RelayConfig, action: Arc<dyn WakeAction>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral relay listener should bind");
        let port = listener
            .local_addr()
            .expect("ephemeral relay listener should expose local address")
            .port();

        let state = RelayState::new(&config, action);
        let handle = tokio::spawn(async move {
            run_relay_with_listener("127.0.0.1", listener, state).await
        });

        wait_until_relay_ready(port).await;
        Self { port, handle }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{path}", self.port)
    }
}

impl Drop for RelayTestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn wait_until_relay_ready(port: u16) {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .expect("reqwest client should be built");

    for _ in 0..80 {
        let health = client
            .get(format!("http://127.0.0.1:{port}/health"))
            .send()
            .await;
        if matches!(health, Ok(resp) if resp.status() == StatusCode::OK) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    panic!("relay did not become ready on port {port}");
}
