//! Application layer: the API client pipeline and the toast store.

/// Client, interceptors, notification store and facade.
pub mod services;

pub use services::{
    ApiClient, BearerTokenInterceptor, EnvelopeInterceptor, NotificationHandle, NotificationStore,
    Notifier, RequestIdInterceptor, SchoolApi, Subscription, TrackMessages,
};
