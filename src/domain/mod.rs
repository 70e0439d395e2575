//! Domain layer with request/notification entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Toast notification model.
pub mod notification;
/// Port definitions.
pub mod ports;

pub use entities::{
    AuthToken, Failure, FailureKind, HttpMethod, MultipartForm, RequestBody, RequestConfig,
    RequestOptions, RequestOutcome, RetryPolicy,
};
pub use errors::{ApiError, TokenError};
pub use notification::{
    Notification, NotificationDurations, NotificationId, NotificationKind, NotificationStyle,
};
pub use ports::{
    AuthExpiredHandler, AuthExpiry, RequestExecutorPort, RequestInterceptor, ResponseInterceptor,
    TokenStoragePort,
};
