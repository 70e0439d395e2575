use super::client_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "sms-client",
    version,
    about = "Probe the student management API with retries and toast feedback",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// API root, absolute or relative to the origin.
    #[arg(long, env = "SMS_API_BASE")]
    pub base_url: Option<String>,

    /// Origin a relative API root is resolved against.
    #[arg(long)]
    pub origin: Option<String>,

    /// Per-request deadline in milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Total attempts for retryable failures.
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Bearer token attached to every request.
    #[arg(long, env = "SMS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Endpoint path to request.
    #[arg(default_value = "/profile")]
    pub path: String,
}
