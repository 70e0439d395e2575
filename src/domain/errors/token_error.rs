//! Token store error types.

use thiserror::Error;

/// Token store failures.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum TokenError {
    #[error("failed to retrieve stored token: {message}")]
    RetrievalFailed { message: String },

    #[error("failed to store token: {message}")]
    StorageFailed { message: String },

    #[error("failed to delete token: {message}")]
    DeletionFailed { message: String },
}

impl TokenError {
    /// Creates retrieval failed error.
    #[must_use]
    pub fn retrieval_failed(message: impl Into<String>) -> Self {
        Self::RetrievalFailed {
            message: message.into(),
        }
    }

    /// Creates storage failed error.
    #[must_use]
    pub fn storage_failed(message: impl Into<String>) -> Self {
        Self::StorageFailed {
            message: message.into(),
        }
    }

    /// Creates deletion failed error.
    #[must_use]
    pub fn deletion_failed(message: impl Into<String>) -> Self {
        Self::DeletionFailed {
            message: message.into(),
        }
    }
}
