pub mod api_client;
pub mod interceptors;
pub mod notification_store;
pub mod notifier;
pub mod school_api;

pub use api_client::ApiClient;
pub use interceptors::{BearerTokenInterceptor, EnvelopeInterceptor, RequestIdInterceptor};
pub use notification_store::{NotificationHandle, NotificationStore, Subscription};
pub use notifier::{Notifier, TrackMessages};
pub use school_api::SchoolApi;
