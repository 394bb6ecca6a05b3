use super::payload::OutboundPayload;
use crate::config::Settings;
use crate::error::DeliveryError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

/// What happened to a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent { status: u16 },
    /// No webhook configured; nothing left the process.
    Skipped,
}

/// Posts payloads to the configured relay.
///
/// One POST per call with no retries and the client's default timeouts.
#[derive(Debug, Clone)]
pub struct DeliveryClient {
    client: reqwest::Client,
}

impl Default for DeliveryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("openclaw-send/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }

    pub async fn deliver(
        &self,
        settings: &Settings,
        payload: &OutboundPayload,
    ) -> Result<Delivery, DeliveryError> {
        let webhook_url = settings.webhook_url.trim();
        if webhook_url.is_empty() {
            tracing::debug!("no webhook configured, skipping delivery");
            return Ok(Delivery::Skipped);
        }
        if !payload.has_body() {
            return Err(DeliveryError::EmptyBody);
        }

        let body = serde_json::to_vec(payload)
            .map_err(|e| DeliveryError::Transport(format!("encode payload: {e}")))?;
        let mut request = self
            .client
            .post(webhook_url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        let token = settings.auth_token.trim();
        if !token.is_empty() {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "relay rejected payload");
            return Err(DeliveryError::Status {
                status: status.as_u16(),
            });
        }

        tracing::info!(status = status.as_u16(), url = %payload.url, "payload delivered");
        Ok(Delivery::Sent {
            status: status.as_u16(),
        })
    }
}
