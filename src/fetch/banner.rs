//! Dismissible inline error banners.

use crate::api::{ApiError, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// An error shown inline on a page until the user dismisses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub severity: Severity,
    pub kind: ErrorKind,
    pub message: String,
}

impl Banner {
    pub fn from_error(error: &ApiError) -> Self {
        let (severity, message) = match error {
            ApiError::Unauthorized(_) => (
                Severity::Warning,
                "Your session has expired. Sign in again to continue.".to_string(),
            ),
            ApiError::Forbidden(msg) => (
                Severity::Warning,
                format!("You do not have access to this page: {msg}"),
            ),
            ApiError::Status { status, message } => {
                (Severity::Error, format!("Request failed ({status}): {message}"))
            }
            ApiError::Timeout => (
                Severity::Error,
                "The gateway did not respond in time.".to_string(),
            ),
            ApiError::Network(msg) => {
                (Severity::Error, format!("Could not reach the gateway: {msg}"))
            }
            other => (Severity::Error, other.to_string()),
        };

        Self {
            severity,
            kind: error.kind(),
            message,
        }
    }

    pub fn is_auth(&self) -> bool {
        self.kind == ErrorKind::Auth
    }
}

impl std::fmt::Display for Banner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "[{label}] {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_ask_to_sign_in() {
        let banner = Banner::from_error(&ApiError::Unauthorized("expired".into()));
        assert!(banner.is_auth());
        assert_eq!(banner.severity, Severity::Warning);
        assert!(banner.message.contains("Sign in again"));
    }

    #[test]
    fn test_status_errors_keep_backend_message() {
        let banner = Banner::from_error(&ApiError::from_status(503, r#"{"error":"queue full"}"#));
        assert!(!banner.is_auth());
        assert_eq!(banner.to_string(), "[error] Request failed (503): queue full");
    }
}
