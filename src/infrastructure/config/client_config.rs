//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::args::CliArgs;
use crate::domain::entities::{DEFAULT_TIMEOUT, RetryPolicy};
use crate::domain::notification::NotificationDurations;

pub(super) const APP_NAME: &str = "sms-client";
pub(super) const APP_QUALIFIER: &str = "com";
pub(super) const APP_ORGANIZATION: &str = "school";

const FALLBACK_BASE_URL: &str = "/api";
const DEFAULT_ORIGIN: &str = "http://localhost:8080";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Client configuration, loaded from `config.toml` and overridden by CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Origin a relative `base_url` is resolved against.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// API root. Relative values are joined onto `origin`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request deadline in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retry configuration.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Default toast durations.
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

/// Retry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the second attempt, in milliseconds.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Growth factor between consecutive delays.
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Per-kind toast durations in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Success toast lifetime.
    #[serde(default = "default_success_ms")]
    pub success_ms: u64,
    /// Error toast lifetime.
    #[serde(default = "default_error_ms")]
    pub error_ms: u64,
    /// Warning toast lifetime.
    #[serde(default = "default_warning_ms")]
    pub warning_ms: u64,
    /// Info toast lifetime.
    #[serde(default = "default_info_ms")]
    pub info_ms: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            success_ms: default_success_ms(),
            error_ms: default_error_ms(),
            warning_ms: default_warning_ms(),
            info_ms: default_info_ms(),
        }
    }
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

fn default_base_url() -> String {
    option_env!("SMS_API_BASE")
        .unwrap_or(FALLBACK_BASE_URL)
        .to_string()
}

fn default_timeout_ms() -> u64 {
    u64::try_from(DEFAULT_TIMEOUT.as_millis()).unwrap_or(u64::MAX)
}

fn default_max_attempts() -> u32 {
    RetryPolicy::default().max_attempts()
}

fn default_base_delay_ms() -> u64 {
    u64::try_from(RetryPolicy::default().base_delay().as_millis()).unwrap_or(u64::MAX)
}

fn default_backoff_multiplier() -> u32 {
    RetryPolicy::default().backoff_multiplier()
}

fn default_success_ms() -> u64 {
    3000
}

fn default_error_ms() -> u64 {
    5000
}

fn default_warning_ms() -> u64 {
    4000
}

fn default_info_ms() -> u64 {
    3000
}

impl ClientConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(origin) = &args.origin {
            self.origin.clone_from(origin);
        }
        if let Some(base_url) = &args.base_url {
            self.base_url.clone_from(base_url);
        }
        if let Some(timeout_ms) = args.timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        if let Some(max_attempts) = args.max_attempts {
            self.retry.max_attempts = max_attempts;
        }
    }

    /// Base URL handed to the HTTP executor.
    #[must_use]
    pub fn effective_base_url(&self) -> String {
        let base = self.base_url.trim();
        if base.starts_with("http://") || base.starts_with("https://") {
            return base.trim_end_matches('/').to_string();
        }

        format!(
            "{}/{}",
            self.origin.trim().trim_end_matches('/'),
            base.trim_matches('/')
        )
    }

    /// Default request deadline.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Retry policy described by the `[retry]` table.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new()
            .with_max_attempts(self.retry.max_attempts)
            .with_base_delay(Duration::from_millis(self.retry.base_delay_ms))
            .with_backoff_multiplier(self.retry.backoff_multiplier)
    }

    /// Toast durations described by the `[notifications]` table.
    #[must_use]
    pub const fn durations(&self) -> NotificationDurations {
        NotificationDurations {
            success: Duration::from_millis(self.notifications.success_ms),
            error: Duration::from_millis(self.notifications.error_ms),
            warning: Duration::from_millis(self.notifications.warning_ms),
            info: Duration::from_millis(self.notifications.info_ms),
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("sms-client.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            origin: default_origin(),
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            retry: RetryConfig::default(),
            notifications: NotificationsConfig::default(),
        }
    }
}
