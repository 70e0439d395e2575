//! Token storage port definition.

use async_trait::async_trait;

use crate::domain::entities::AuthToken;
use crate::domain::errors::TokenError;

/// Opaque key-value store holding the session token.
#[async_trait]
pub trait TokenStoragePort: Send + Sync {
    /// Retrieves stored token.
    async fn get_token(&self) -> Result<Option<AuthToken>, TokenError>;

    /// Stores token.
    async fn store_token(&self, token: &AuthToken) -> Result<(), TokenError>;

    /// Deletes stored token.
    async fn delete_token(&self) -> Result<(), TokenError>;

    /// Checks if token exists.
    async fn has_token(&self) -> Result<bool, TokenError> {
        Ok(self.get_token().await?.is_some())
    }
}
