//! One user-triggered send: settings snapshot, extraction, payload, POST.

use super::client::{Delivery, DeliveryClient};
use super::payload::build_payload;
use crate::config::Settings;
use crate::error::{ExtractionError, SendError};
use crate::extract::{ExtractOptions, Tab, extract};
use chrono::Utc;

#[derive(Debug, Clone, Default)]
pub struct SendRequest {
    pub message: String,
    pub selection_override: Option<String>,
    pub options: ExtractOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent { display_name: String },
    /// No webhook configured.
    Skipped,
}

/// Extract `tab` and post it to the relay named in `settings`.
///
/// Runs strictly in sequence and is not cancelable once the POST is issued.
/// An unconfigured webhook short-circuits before the page is read.
pub async fn send_page(
    tab: Option<&dyn Tab>,
    settings: &Settings,
    client: &DeliveryClient,
    request: &SendRequest,
) -> Result<SendOutcome, SendError> {
    if !settings.is_configured() {
        return Ok(SendOutcome::Skipped);
    }
    let tab = tab.ok_or(ExtractionError::NoActiveTarget)?;

    let result = extract(tab, request.options).await?;
    let payload = build_payload(
        result,
        &request.message,
        request.selection_override.as_deref(),
        Utc::now(),
    );

    match client.deliver(settings, &payload).await? {
        Delivery::Sent { .. } => Ok(SendOutcome::Sent {
            display_name: settings.display_name().to_string(),
        }),
        Delivery::Skipped => Ok(SendOutcome::Skipped),
    }
}

/// Short status line for the user.
pub fn status_text(outcome: &Result<SendOutcome, SendError>) -> String {
    match outcome {
        Ok(SendOutcome::Sent { display_name }) => format!("Sent to {display_name}."),
        Ok(SendOutcome::Skipped) => "Set a webhook URL in Options first.".into(),
        Err(SendError::Extraction(ExtractionError::NoActiveTarget)) => {
            "No active tab found.".into()
        }
        Err(SendError::Extraction(err)) => format!("Failed to read page: {err}"),
        Err(_) => "Failed to send. Check webhook URL/token.".into(),
    }
}
