//! Interceptor port definitions.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::entities::RequestConfig;

/// Mutates a request before it is sent.
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Adjusts the config in place.
    async fn intercept(&self, config: &mut RequestConfig);
}

/// Transforms a successful response body.
pub trait ResponseInterceptor: Send + Sync {
    /// Returns a replacement body, or `None` to keep the current one.
    fn intercept(&self, body: &Value) -> Option<Value>;
}

#[async_trait]
impl<F> RequestInterceptor for F
where
    F: Fn(&mut RequestConfig) + Send + Sync,
{
    async fn intercept(&self, config: &mut RequestConfig) {
        self(config);
    }
}

impl<F> ResponseInterceptor for F
where
    F: Fn(&Value) -> Option<Value> + Send + Sync,
{
    fn intercept(&self, body: &Value) -> Option<Value> {
        self(body)
    }
}
