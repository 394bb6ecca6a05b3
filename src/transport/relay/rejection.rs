use super::RelayResponse;
use crate::error::ActionError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub const MISSING_FIELDS: &str = "Missing required fields (url, title, content or selection).";

/// Every way a relay request can fail, rendered as `{ok: false, error}`.
#[derive(Debug)]
pub enum RelayRejection {
    Unauthorized,
    MissingFields,
    InvalidJson(String),
    Action(ActionError),
}

impl RelayRejection {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::MissingFields | Self::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Self::Action(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Unauthorized => "Unauthorized".into(),
            Self::MissingFields => MISSING_FIELDS.into(),
            Self::InvalidJson(detail) => format!("Invalid JSON: {detail}"),
            Self::Action(err) => err.to_string(),
        }
    }
}

impl From<ActionError> for RelayRejection {
    fn from(err: ActionError) -> Self {
        Self::Action(err)
    }
}

impl IntoResponse for RelayRejection {
    fn into_response(self) -> Response {
        (self.status(), Json(RelayResponse::error(self.message()))).into_response()
    }
}
