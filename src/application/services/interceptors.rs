//! Stock request and response interceptors.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::RequestConfig;
use crate::domain::ports::{RequestInterceptor, ResponseInterceptor, TokenStoragePort};

const AUTHORIZATION: &str = "Authorization";
const REQUEST_ID: &str = "X-Request-ID";

/// Attaches `Authorization: Bearer <token>` when the store holds a token.
pub struct BearerTokenInterceptor {
    storage: Arc<dyn TokenStoragePort>,
}

impl BearerTokenInterceptor {
    /// Creates interceptor reading from `storage` on every request.
    #[must_use]
    pub fn new(storage: Arc<dyn TokenStoragePort>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl RequestInterceptor for BearerTokenInterceptor {
    async fn intercept(&self, config: &mut RequestConfig) {
        match self.storage.get_token().await {
            Ok(Some(token)) => config.set_header(AUTHORIZATION, token.bearer()),
            Ok(None) => {}
            Err(e) => debug!(error = %e, "Token lookup failed, sending unauthenticated"),
        }
    }
}

/// Stamps each request with a fresh `X-Request-ID`, unless the caller set one.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdInterceptor;

#[async_trait]
impl RequestInterceptor for RequestIdInterceptor {
    async fn intercept(&self, config: &mut RequestConfig) {
        if config.header(REQUEST_ID).is_none() {
            config.set_header(REQUEST_ID, Uuid::new_v4().to_string());
        }
    }
}

/// Unwraps `{ "data": X, ... }` to `X`. Other bodies pass through.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeInterceptor;

impl ResponseInterceptor for EnvelopeInterceptor {
    fn intercept(&self, body: &Value) -> Option<Value> {
        body.as_object()?.get("data").cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AuthToken, HttpMethod};
    use crate::infrastructure::storage::InMemoryTokenStorage;
    use serde_json::json;

    #[tokio::test]
    async fn test_bearer_overwrites_stale_header() {
        let storage = Arc::new(InMemoryTokenStorage::with_token(AuthToken::new_unchecked(
            "fresh",
        )));
        let interceptor = BearerTokenInterceptor::new(storage);
        let mut config = RequestConfig::new(HttpMethod::Get, "/profile");
        config.set_header("authorization", "Bearer stale");

        interceptor.intercept(&mut config).await;

        assert_eq!(config.header("Authorization"), Some("Bearer fresh"));
        assert_eq!(config.headers().len(), 1);
    }

    #[tokio::test]
    async fn test_request_id_is_unique_and_preserved() {
        let mut first = RequestConfig::new(HttpMethod::Get, "/a");
        let mut second = RequestConfig::new(HttpMethod::Get, "/b");
        let mut preset = RequestConfig::new(HttpMethod::Get, "/c");
        preset.set_header("x-request-id", "fixed");

        RequestIdInterceptor.intercept(&mut first).await;
        RequestIdInterceptor.intercept(&mut second).await;
        RequestIdInterceptor.intercept(&mut preset).await;

        let first_id = first.header(REQUEST_ID).unwrap();
        assert!(Uuid::parse_str(first_id).is_ok());
        assert_ne!(Some(first_id), second.header(REQUEST_ID));
        assert_eq!(preset.header(REQUEST_ID), Some("fixed"));
    }

    #[test]
    fn test_envelope_unwrap() {
        assert_eq!(
            EnvelopeInterceptor.intercept(&json!({"data": [1, 2], "message": "ok"})),
            Some(json!([1, 2]))
        );
        assert_eq!(EnvelopeInterceptor.intercept(&json!({"id": 3})), None);
        assert_eq!(EnvelopeInterceptor.intercept(&json!([1])), None);
    }
}
