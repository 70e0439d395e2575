//! Client configuration.

pub mod args;
pub mod client_config;
pub mod storage;

pub use args::CliArgs;
pub use client_config::{ClientConfig, LogLevel, NotificationsConfig, RetryConfig};
pub use storage::{ConfigError, ConfigStorage};
