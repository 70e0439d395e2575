//! Session expiry handling: token invalidation and login redirect.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::domain::ports::{AuthExpiredHandler, AuthExpiry, TokenStoragePort};

/// Events emitted towards the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The stored token was dropped; the UI should show the login view.
    LoginRequired {
        /// What reported the expiry.
        reason: AuthExpiry,
    },
}

/// Clears the stored token and asks the UI to navigate to login.
pub struct SessionExpiryHandler {
    storage: Arc<dyn TokenStoragePort>,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionExpiryHandler {
    /// Creates handler deleting from `storage` and reporting on `event_tx`.
    #[must_use]
    pub fn new(
        storage: Arc<dyn TokenStoragePort>,
        event_tx: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        Self { storage, event_tx }
    }
}

#[async_trait]
impl AuthExpiredHandler for SessionExpiryHandler {
    async fn on_auth_expired(&self, reason: AuthExpiry) {
        if let Err(e) = self.storage.delete_token().await {
            warn!(error = %e, "Failed to clear stored token");
        }

        info!(?reason, "Redirecting to login");
        if self
            .event_tx
            .send(SessionEvent::LoginRequired { reason })
            .is_err()
        {
            warn!("Session event receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AuthToken;
    use crate::infrastructure::storage::InMemoryTokenStorage;

    #[tokio::test]
    async fn test_expiry_clears_token_and_requests_login() {
        let storage = Arc::new(InMemoryTokenStorage::with_token(AuthToken::new_unchecked(
            "expired",
        )));
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let handler = SessionExpiryHandler::new(storage.clone(), event_tx);

        handler.on_auth_expired(AuthExpiry::UnauthorizedStatus).await;

        assert!(storage.get_token().await.unwrap().is_none());
        assert_eq!(
            event_rx.recv().await,
            Some(SessionEvent::LoginRequired {
                reason: AuthExpiry::UnauthorizedStatus
            })
        );
    }

    #[tokio::test]
    async fn test_dropped_receiver_is_tolerated() {
        let storage = Arc::new(InMemoryTokenStorage::new());
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        drop(event_rx);

        let handler = SessionExpiryHandler::new(storage, event_tx);
        handler.on_auth_expired(AuthExpiry::UnauthorizedEnvelope).await;
    }
}
