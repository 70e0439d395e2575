//! Terminal API call error.

use serde_json::Value;
use thiserror::Error;

use crate::domain::entities::{Failure, FailureKind};

/// Error returned to callers once the retry policy gives up.
///
/// `status` is 0 when no HTTP response was obtained.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Failure category of the last attempt.
    pub kind: FailureKind,
    /// User-facing message.
    pub message: String,
    /// HTTP status, or 0 for network and timeout failures.
    pub status: u16,
    /// Raw response body, when one was decoded.
    pub body: Option<Value>,
}

impl ApiError {
    /// Creates an error from its parts.
    #[must_use]
    pub fn new(kind: FailureKind, message: impl Into<String>, status: u16) -> Self {
        Self {
            kind,
            message: message.into(),
            status,
            body: None,
        }
    }

    /// Creates an error for a request body that could not be serialized.
    #[must_use]
    pub fn invalid_body(error: &serde_json::Error) -> Self {
        Self::new(
            FailureKind::ParseError,
            format!("failed to serialize request body: {error}"),
            0,
        )
    }

    /// Whether the server rejected the session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Whether the error was a 4xx response.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self.kind, FailureKind::ClientError)
    }

    /// Whether no HTTP response was obtained.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self.kind, FailureKind::Network | FailureKind::Timeout)
    }
}

impl From<Failure> for ApiError {
    fn from(failure: Failure) -> Self {
        Self {
            kind: failure.kind,
            message: failure.message,
            status: failure.status.unwrap_or(0),
            body: failure.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_network_failure_has_zero_status() {
        let error = ApiError::from(Failure::timeout());

        assert_eq!(error.status, 0);
        assert!(error.is_network_error());
        assert_eq!(error.to_string(), "Request timeout - please try again");
    }

    #[test]
    fn test_response_failure_keeps_body() {
        let body = json!({"error": "token expired"});
        let failure =
            Failure::from_response(FailureKind::ClientError, 401, Some("Unauthorized"), Some(body.clone()));
        let error = ApiError::from(failure);

        assert!(error.is_unauthorized());
        assert!(error.is_client_error());
        assert_eq!(error.message, "token expired");
        assert_eq!(error.body, Some(body));
    }
}
