//! Mapping of HTTP failures onto [`ServiceError`].
//!
//! Error responses carry a JSON body of the form
//! `{"error": {"code": 404, "message": "...", "status": "NOT_FOUND"}}`. The
//! `status` name wins when present; otherwise the HTTP status is mapped to the
//! closest canonical code.

use serde::Deserialize;
use transcoder::{ServiceError, StatusCode};

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Maps an HTTP status to the canonical code the service would report.
pub(crate) fn code_for_http(status: u16) -> StatusCode {
    match status {
        400 => StatusCode::InvalidArgument,
        401 => StatusCode::Unauthenticated,
        403 => StatusCode::PermissionDenied,
        404 => StatusCode::NotFound,
        409 => StatusCode::AlreadyExists,
        412 => StatusCode::FailedPrecondition,
        429 => StatusCode::ResourceExhausted,
        499 => StatusCode::Cancelled,
        500 => StatusCode::Internal,
        501 => StatusCode::Unimplemented,
        502 | 503 => StatusCode::Unavailable,
        504 => StatusCode::DeadlineExceeded,
        _ => StatusCode::Unknown,
    }
}

/// Builds the error for a non-success response.
pub(crate) fn from_response(status: u16, body: &str) -> ServiceError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let code = envelope
                .error
                .status
                .as_deref()
                .and_then(StatusCode::from_name)
                .unwrap_or_else(|| code_for_http(status));
            let message = if envelope.error.message.is_empty() {
                format!("HTTP {status}")
            } else {
                envelope.error.message
            };
            ServiceError::new(code, message)
        }
        Err(_) => {
            let trimmed = body.trim();
            let message = if trimmed.is_empty() {
                format!("HTTP {status}")
            } else {
                format!("HTTP {status}: {trimmed}")
            };
            ServiceError::new(code_for_http(status), message)
        }
    }
}

/// Builds the error for a request that produced no response.
pub(crate) fn from_transport(err: &reqwest::Error) -> ServiceError {
    let code = if err.is_timeout() {
        StatusCode::DeadlineExceeded
    } else {
        StatusCode::Unavailable
    };
    ServiceError::new(code, error_chain(err))
}

/// Flattens an error and its sources into one line.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        source = inner.source();
    }
    text
}
