//! API errors.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Longest raw response body quoted in an error message.
const MAX_QUOTED_BODY: usize = 200;

/// Errors that can occur when talking to the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was rejected for missing or expired credentials.
    #[error("authentication required")]
    Unauthorized,

    /// The addressed resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// Any other non-2xx response.
    #[error("request failed with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-supplied message, or the status reason.
        message: String,
    },

    /// No response arrived within the configured time.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The caller abandoned the request.
    #[error("request cancelled")]
    Cancelled,

    /// Connection or protocol failure.
    #[error("http error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body was not what the endpoint promises.
    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// Build the error for a non-2xx response from its status and body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized,
            StatusCode::NOT_FOUND => Self::NotFound,
            _ => Self::Status {
                status: status.as_u16(),
                message: extract_message(body).unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string()
                }),
            },
        }
    }

    /// A message fit to show the shopper, when the server supplied one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Whether the caller abandoned the request.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error)
        } else {
            Self::Transport(error)
        }
    }
}

/// Pull a human readable message out of an error body.
///
/// Understands `{"detail": ...}`, `{"message": ...}` and `{"error": ...}`,
/// including field-keyed lists of messages; falls back to short plain-text
/// bodies.
fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();

    if body.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return (body.len() <= MAX_QUOTED_BODY && !body.starts_with('<'))
            .then(|| body.to_string());
    };

    ["detail", "message", "error"]
        .into_iter()
        .find_map(|key| value.get(key).and_then(first_text))
        .or_else(|| value.as_object()?.values().find_map(first_text))
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Array(values) => values.iter().find_map(first_text),
        _ => None,
    }
}
