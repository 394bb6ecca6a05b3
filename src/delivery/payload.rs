use crate::extract::ExtractionResult;
use crate::utils::normalize_whitespace;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// JSON body posted to the relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundPayload {
    pub url: String,
    pub title: String,
    pub content: String,
    pub selection: String,
    /// Free-form note from the user, possibly empty.
    pub message: String,
    /// RFC 3339 UTC instant with millisecond precision.
    pub timestamp: String,
}

impl OutboundPayload {
    /// At least one of `content` and `selection` carries text.
    pub fn has_body(&self) -> bool {
        !self.content.trim().is_empty() || !self.selection.trim().is_empty()
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Fold an extraction, a user note, and a send time into a payload.
///
/// A non-empty `selection_override` replaces the captured selection.
pub fn build_payload(
    result: ExtractionResult,
    message: &str,
    selection_override: Option<&str>,
    at: DateTime<Utc>,
) -> OutboundPayload {
    let selection = selection_override
        .map(normalize_whitespace)
        .filter(|selection| !selection.is_empty())
        .unwrap_or(result.selection);

    OutboundPayload {
        url: result.url,
        title: result.title,
        content: result.content,
        selection,
        message: message.trim().to_string(),
        timestamp: format_timestamp(at),
    }
}
