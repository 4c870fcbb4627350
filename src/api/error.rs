//! API error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Longest backend error text carried into an error message.
const MAX_MESSAGE_LEN: usize = 200;

/// Errors returned by [`ApiClient`](crate::api::ApiClient) calls.
///
/// 401 and 403 get their own variants so callers can tell a rejected
/// session apart from every other failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The backend did not accept the session (HTTP 401).
    #[error("Not authenticated: {0}")]
    Unauthorized(String),

    /// The session is valid but lacks access (HTTP 403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Any other non-success status.
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// Connection or transport failure; no response was received.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The request body could not be serialized.
    #[error("Invalid request body: {0}")]
    Encode(String),

    /// The path is not a relative API path.
    #[error("Invalid request path: {0}")]
    InvalidPath(String),
}

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 401 or 403.
    Auth,
    /// Any other HTTP status.
    Http,
    /// Timeout or transport failure.
    Network,
    /// Encoding, decoding or path problems on the client side.
    Client,
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Build the error for a non-success response from its status and body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_message(status, body);
        match status {
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            _ => ApiError::Status { status, message },
        }
    }

    /// True for 401 and 403 responses.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_) | ApiError::Forbidden(_))
    }

    /// HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Unauthorized(_) | ApiError::Forbidden(_) => ErrorKind::Auth,
            ApiError::Status { .. } => ErrorKind::Http,
            ApiError::Timeout | ApiError::Network(_) => ErrorKind::Network,
            ApiError::Decode(_) | ApiError::Encode(_) | ApiError::InvalidPath(_) => {
                ErrorKind::Client
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Backends answer with `{"error": ...}`, `{"message": ...}` or
/// `{"detail": ...}`; anything else falls back to the raw text, then to the
/// canonical reason phrase.
fn extract_message(status: u16, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message", "detail"] {
            if let Some(serde_json::Value::String(msg)) = map.get(key) {
                if !msg.trim().is_empty() {
                    return truncate(msg.trim());
                }
            }
        }
    }

    let text = body.trim();
    if !text.is_empty() {
        return truncate(text);
    }

    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("unknown status")
        .to_string()
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_MESSAGE_LEN) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
