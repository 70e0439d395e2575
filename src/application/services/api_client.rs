//! API client: interceptor pipeline and retry policy around a request executor.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::interceptors::BearerTokenInterceptor;
use crate::domain::entities::envelope;
use crate::domain::entities::{
    DEFAULT_TIMEOUT, Failure, FailureKind, HttpMethod, RequestBody, RequestConfig, RequestOptions,
    RequestOutcome, RetryPolicy,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::{
    AuthExpiredHandler, AuthExpiry, RequestExecutorPort, RequestInterceptor, ResponseInterceptor,
    TokenStoragePort,
};

/// HTTP API client.
///
/// Each call builds a [`RequestConfig`] and runs the request interceptors
/// in registration order. The executor is then invoked under the
/// [`RetryPolicy`]: client errors are never retried, while network, timeout
/// and server errors are retried with exponential backoff. On success the
/// response interceptors transform the body, again in registration order.
///
/// Calls share nothing mutable, so any number may be in flight at once.
pub struct ApiClient {
    executor: Arc<dyn RequestExecutorPort>,
    retry_policy: RetryPolicy,
    timeout: Duration,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
    auth_expired: Option<Arc<dyn AuthExpiredHandler>>,
}

impl ApiClient {
    /// Creates a client with the default retry policy and a 30s deadline.
    #[must_use]
    pub fn new(executor: Arc<dyn RequestExecutorPort>) -> Self {
        Self {
            executor,
            retry_policy: RetryPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
            auth_expired: None,
        }
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Sets the default per-request deadline. Zero is ignored.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.timeout = timeout;
        }
        self
    }

    /// Appends a request interceptor.
    #[must_use]
    pub fn with_request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.request_interceptors.push(Arc::new(interceptor));
        self
    }

    /// Appends a response interceptor.
    #[must_use]
    pub fn with_response_interceptor(
        mut self,
        interceptor: impl ResponseInterceptor + 'static,
    ) -> Self {
        self.response_interceptors.push(Arc::new(interceptor));
        self
    }

    /// Appends a bearer token interceptor reading from `storage`.
    #[must_use]
    pub fn with_token_storage(self, storage: Arc<dyn TokenStoragePort>) -> Self {
        self.with_request_interceptor(BearerTokenInterceptor::new(storage))
    }

    /// Sets the handler invoked when the server reports an expired session.
    #[must_use]
    pub fn with_auth_expired_handler(mut self, handler: Arc<dyn AuthExpiredHandler>) -> Self {
        self.auth_expired = Some(handler);
        self
    }

    /// Returns the active retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the default per-request deadline.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends a GET request.
    ///
    /// # Errors
    /// Returns the classified failure of the last attempt.
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.get_with(path, RequestOptions::default()).await
    }

    /// Sends a GET request with per-call headers or timeout.
    ///
    /// # Errors
    /// Returns the classified failure of the last attempt.
    pub async fn get_with(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        self.send(HttpMethod::Get, path, None, options).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    /// Returns the classified failure of the last attempt.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        self.post_with(path, body, RequestOptions::default()).await
    }

    /// Sends a POST request with a JSON body and per-call options.
    ///
    /// # Errors
    /// Returns the classified failure of the last attempt.
    pub async fn post_with<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.send_json(HttpMethod::Post, path, body, options).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    /// Returns the classified failure of the last attempt.
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        self.put_with(path, body, RequestOptions::default()).await
    }

    /// Sends a PUT request with a JSON body and per-call options.
    ///
    /// # Errors
    /// Returns the classified failure of the last attempt.
    pub async fn put_with<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.send_json(HttpMethod::Put, path, body, options).await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    /// Returns the classified failure of the last attempt.
    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        self.patch_with(path, body, RequestOptions::default()).await
    }

    /// Sends a PATCH request with a JSON body and per-call options.
    ///
    /// # Errors
    /// Returns the classified failure of the last attempt.
    pub async fn patch_with<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.send_json(HttpMethod::Patch, path, body, options).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    /// Returns the classified failure of the last attempt.
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.delete_with(path, RequestOptions::default()).await
    }

    /// Sends a DELETE request with per-call headers or timeout.
    ///
    /// # Errors
    /// Returns the classified failure of the last attempt.
    pub async fn delete_with(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.send(HttpMethod::Delete, path, None, options).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let body = RequestBody::json(body).map_err(|e| ApiError::invalid_body(&e))?;
        self.send(method, path, Some(body), options).await
    }

    /// Sends a request with an arbitrary body and per-call options.
    ///
    /// # Errors
    /// Returns the classified failure of the last attempt. Client and parse
    /// errors are returned after a single attempt.
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let mut config = RequestConfig::build(method, path, body, options, self.timeout);

        for interceptor in &self.request_interceptors {
            interceptor.intercept(&mut config).await;
        }

        match self.execute_with_retry(&config).await {
            Ok(body) => Ok(self.handle_success(body).await),
            Err(failure) => Err(self.handle_failure(&config, failure).await),
        }
    }

    async fn execute_with_retry(&self, config: &RequestConfig) -> Result<Value, Failure> {
        let max_attempts = self.retry_policy.max_attempts();
        let mut attempt = 1;

        loop {
            let failure = match self.executor.execute(config).await {
                RequestOutcome::Success { status, body } => {
                    debug!(
                        method = %config.method(),
                        path = config.path(),
                        status,
                        attempt,
                        "Request succeeded"
                    );
                    return Ok(body);
                }
                RequestOutcome::Failure(failure) => failure,
            };

            if !failure.kind.is_retryable() || attempt >= max_attempts {
                return Err(failure);
            }

            attempt += 1;
            let delay = self.retry_policy.delay_before(attempt);
            warn!(
                method = %config.method(),
                path = config.path(),
                kind = ?failure.kind,
                status = failure.status,
                attempt,
                delay_ms = delay.as_millis(),
                "Retrying request"
            );
            sleep(delay).await;
        }
    }

    async fn handle_success(&self, body: Value) -> Value {
        if envelope::is_unauthorized(&body) {
            self.notify_auth_expired(AuthExpiry::UnauthorizedEnvelope)
                .await;
        }

        self.response_interceptors
            .iter()
            .fold(body, |body, interceptor| {
                interceptor.intercept(&body).unwrap_or(body)
            })
    }

    async fn handle_failure(&self, config: &RequestConfig, failure: Failure) -> ApiError {
        warn!(
            method = %config.method(),
            path = config.path(),
            kind = ?failure.kind,
            status = failure.status,
            message = %failure.message,
            "Request failed"
        );

        if failure.kind == FailureKind::ClientError && failure.status == Some(401) {
            self.notify_auth_expired(AuthExpiry::UnauthorizedStatus).await;
        }

        ApiError::from(failure)
    }

    async fn notify_auth_expired(&self, reason: AuthExpiry) {
        if let Some(handler) = &self.auth_expired {
            info!(?reason, "Session expired");
            handler.on_auth_expired(reason).await;
        }
    }
}
