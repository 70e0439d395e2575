//! Classified result of a single network call.

use serde_json::Value;

use super::envelope;

/// Message used when a request exceeds its deadline.
pub const TIMEOUT_MESSAGE: &str = "Request timeout - please try again";
/// Message used when no response reached the client.
pub const NETWORK_MESSAGE: &str = "Network error - please check your connection";

/// Closed set of failure categories; drives the retry decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Transport failure, no response received.
    Network,
    /// Deadline exceeded, call aborted.
    Timeout,
    /// 4xx response.
    ClientError,
    /// 5xx or any other non-2xx response.
    ServerError,
    /// 2xx response whose JSON body could not be decoded.
    ParseError,
}

impl FailureKind {
    /// Classifies an HTTP status. Returns `None` for 2xx.
    #[must_use]
    pub const fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            400..=499 => Some(Self::ClientError),
            _ => Some(Self::ServerError),
        }
    }

    /// Whether re-sending the same request may succeed.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Network | Self::Timeout | Self::ServerError)
    }
}

/// Failed call with enough context to build a user-facing error.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    /// Category.
    pub kind: FailureKind,
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
    /// Decoded response body, when available.
    pub body: Option<Value>,
    /// Human readable message.
    pub message: String,
}

impl Failure {
    /// Creates a transport failure.
    #[must_use]
    pub fn network() -> Self {
        Self {
            kind: FailureKind::Network,
            status: None,
            body: None,
            message: NETWORK_MESSAGE.to_string(),
        }
    }

    /// Creates a deadline failure.
    #[must_use]
    pub fn timeout() -> Self {
        Self {
            kind: FailureKind::Timeout,
            status: None,
            body: None,
            message: TIMEOUT_MESSAGE.to_string(),
        }
    }

    /// Creates a decode failure for a successful status.
    #[must_use]
    pub fn parse(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::ParseError,
            status: Some(status),
            body: None,
            message: message.into(),
        }
    }

    /// Creates a failure for a non-2xx response.
    ///
    /// The message comes from the body's `error`, then its `message`, then
    /// the status text.
    #[must_use]
    pub fn from_response(
        kind: FailureKind,
        status: u16,
        status_text: Option<&str>,
        body: Option<Value>,
    ) -> Self {
        let message = envelope::failure_message(body.as_ref(), status_text);
        Self {
            kind,
            status: Some(status),
            body,
            message,
        }
    }
}

/// Result of one executor call. The executor never errors out-of-band.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// 2xx response.
    Success {
        /// HTTP status.
        status: u16,
        /// Decoded body, `Null` when the response carried no JSON.
        body: Value,
    },
    /// Any other result.
    Failure(Failure),
}

impl RequestOutcome {
    /// Shorthand for a successful outcome.
    #[must_use]
    pub const fn success(status: u16, body: Value) -> Self {
        Self::Success { status, body }
    }

    /// Returns the failure kind, if any.
    #[must_use]
    pub const fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(failure) => Some(failure.kind),
        }
    }
}

impl From<Failure> for RequestOutcome {
    fn from(failure: Failure) -> Self {
        Self::Failure(failure)
    }
}
