//! Infrastructure layer with external service adapters.

/// Client configuration.
pub mod config;
/// HTTP transport.
pub mod http;
/// Session expiry handling.
pub mod session;
/// Token storage adapters.
pub mod storage;

pub use config::{ClientConfig, CliArgs, ConfigError, ConfigStorage, LogLevel};
pub use http::ReqwestExecutor;
pub use session::{SessionEvent, SessionExpiryHandler};
pub use storage::InMemoryTokenStorage;
