//! Axum relay that turns posted pages into wake events.
//!
//! - `POST /send-to-openclaw` authenticates, validates, digests, and runs the
//!   wake action, answering only after the action exits
//! - `GET /health` always answers `{ok: true}`
//! - every response carries permissive CORS headers and `OPTIONS` is
//!   answered with `204` before routing
//! - bodies are capped at 2 MiB

mod action;
mod auth;
mod digest;
mod handlers;
mod rejection;
mod server;

pub use action::{ActionFuture, CommandAction, WakeAction};
pub use digest::format_wake_text;
pub use rejection::{MISSING_FIELDS, RelayRejection};
pub use server::{build_app, run_relay, run_relay_with_listener};

use crate::config::{RelayConfig, WakeMode};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

pub const SEND_PATH: &str = "/send-to-openclaw";
pub const HEALTH_PATH: &str = "/health";
/// Maximum request body size (2 MiB).
pub const MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Shared state for all relay handlers.
#[derive(Clone)]
pub struct RelayState {
    /// Expected bearer secret, `None` when authentication is off.
    pub token: Option<Arc<str>>,
    pub wake_mode: WakeMode,
    pub action: Arc<dyn WakeAction>,
}

impl RelayState {
    pub fn new(config: &RelayConfig, action: Arc<dyn WakeAction>) -> Self {
        Self {
            token: config
                .requires_auth()
                .then(|| Arc::from(config.webhook_token.as_str())),
            wake_mode: config.wake_mode,
            action,
        }
    }
}

/// Body of `POST /send-to-openclaw`. Absent and `null` fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub selection: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub message: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub timestamp: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl RelayRequest {
    /// `url`, `title`, and at least one of `content` or `selection`.
    pub fn has_required_fields(&self) -> bool {
        !self.url.is_empty()
            && !self.title.is_empty()
            && (!self.content.is_empty() || !self.selection.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayResponse {
    pub fn ok() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
        }
    }
}
