//! Error normalization: every [`ChatError`] becomes exactly one status code
//! and one `{ error, details? }` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::error::ChatError;

/// Wire shape of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

const UPSTREAM_FAILURE: &str = "Failed to get AI response";

pub fn normalize(err: &ChatError) -> (StatusCode, ErrorBody) {
    match err {
        ChatError::Configuration { env } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody {
                error: "OpenAI API key is not configured".into(),
                details: Some(format!("Please set {env} in your environment variables")),
            },
        ),
        ChatError::Validation { reason, details } => (
            StatusCode::BAD_REQUEST,
            ErrorBody {
                error: reason.clone(),
                details: details.clone(),
            },
        ),
        ChatError::Upstream { status, message } => (
            upstream_status(*status),
            ErrorBody {
                error: UPSTREAM_FAILURE.into(),
                details: Some(message.clone()),
            },
        ),
        ChatError::Internal(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody {
                error: UPSTREAM_FAILURE.into(),
                details: (!message.is_empty()).then(|| message.clone()),
            },
        ),
    }
}

/// Pass the upstream status through when it is an HTTP error status. The
/// provider only reports non-success responses, so anything outside the
/// 4xx/5xx range is not a status a failed request may carry.
fn upstream_status(status: Option<u16>) -> StatusCode {
    status
        .filter(|s| (400..=599).contains(s))
        .and_then(|s| StatusCode::from_u16(s).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let (status, body) = normalize(&self);
        (status, Json(body)).into_response()
    }
}
