//! Session expiry port definition.

use async_trait::async_trait;

/// What told the client the session is no longer valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthExpiry {
    /// A 2xx body carried `error.code == "UNAUTHORIZED"`.
    UnauthorizedEnvelope,
    /// The server answered 401.
    UnauthorizedStatus,
}

/// Owns the side effects of an expired session: dropping the stored
/// token and sending the user back to login.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthExpiredHandler: Send + Sync {
    /// Called once per response that reports an expired session.
    async fn on_auth_expired(&self, reason: AuthExpiry);
}
