//! sms-client - resilient API client and toast notifications for the
//! student management frontend.
//!
//! The crate follows a layered layout: the domain holds request, outcome and
//! notification types plus the ports, the application layer holds the
//! retrying [`ApiClient`](application::ApiClient) and the
//! [`NotificationStore`](application::NotificationStore), and the
//! infrastructure layer provides the reqwest transport and configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the client and notification services.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "sms-client";
