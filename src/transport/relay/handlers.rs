use super::auth::is_authorized;
use super::digest::format_wake_text;
use super::rejection::RelayRejection;
use super::{RelayRequest, RelayResponse, RelayState};
use crate::utils::truncate_with_ellipsis;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;

const LOG_TITLE_CHARS: usize = 80;

/// GET /health
pub(super) async fn handle_health() -> Json<RelayResponse> {
    Json(RelayResponse::ok())
}

/// POST /send-to-openclaw
pub(super) async fn handle_send(
    State(state): State<RelayState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<RelayResponse>, RelayRejection> {
    if !is_authorized(state.token.as_deref(), &headers) {
        tracing::warn!("relay request rejected: bad or missing bearer token");
        return Err(RelayRejection::Unauthorized);
    }

    let request = parse_body(&body)?;
    if !request.has_required_fields() {
        return Err(RelayRejection::MissingFields);
    }

    let text = format_wake_text(&request);
    tracing::info!(
        title = %truncate_with_ellipsis(&request.title, LOG_TITLE_CHARS),
        url = %request.url,
        mode = %state.wake_mode,
        "waking assistant"
    );

    if let Err(err) = state.action.invoke(&text, state.wake_mode).await {
        tracing::error!(program = state.action.program(), error = %err, "wake action failed");
        return Err(err.into());
    }
    Ok(Json(RelayResponse::ok()))
}

/// Empty bodies and non-object JSON read as a request with no fields.
fn parse_body(body: &[u8]) -> Result<RelayRequest, RelayRejection> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RelayRequest::default());
    }
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| RelayRejection::InvalidJson(e.to_string()))?;
    if !value.is_object() {
        return Ok(RelayRequest::default());
    }
    serde_json::from_value(value).map_err(|e| RelayRejection::InvalidJson(e.to_string()))
}
