//! In-process token storage.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::AuthToken;
use crate::domain::errors::TokenError;
use crate::domain::ports::TokenStoragePort;

/// Token storage living for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryTokenStorage {
    token: RwLock<Option<AuthToken>>,
}

impl InMemoryTokenStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage holding `token`.
    #[must_use]
    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

#[async_trait]
impl TokenStoragePort for InMemoryTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, TokenError> {
        Ok(self.token.read().await.clone())
    }

    async fn store_token(&self, token: &AuthToken) -> Result<(), TokenError> {
        debug!(token = %token, "Storing token");
        *self.token.write().await = Some(token.clone());
        Ok(())
    }

    async fn delete_token(&self) -> Result<(), TokenError> {
        debug!("Deleting stored token");
        *self.token.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_store_and_delete() {
        let storage = InMemoryTokenStorage::new();
        assert!(!storage.has_token().await.unwrap());

        assert_ok!(storage.store_token(&AuthToken::new_unchecked("abc")).await);
        assert_eq!(
            storage.get_token().await.unwrap(),
            Some(AuthToken::new_unchecked("abc"))
        );

        assert_ok!(storage.delete_token().await);
        assert!(storage.get_token().await.unwrap().is_none());
    }
}
