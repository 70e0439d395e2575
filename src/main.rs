use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use sms_client::application::{
    ApiClient, EnvelopeInterceptor, NotificationStore, Notifier, RequestIdInterceptor,
    TrackMessages,
};
use sms_client::domain::{AuthToken, TokenStoragePort};
use sms_client::infrastructure::{
    ClientConfig, CliArgs, ConfigStorage, InMemoryTokenStorage, ReqwestExecutor, SessionEvent,
    SessionExpiryHandler,
};

fn init_logging(config: &ClientConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<ClientConfig> {
    let storage = ConfigStorage::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn token_storage(args: &CliArgs) -> Result<Arc<InMemoryTokenStorage>> {
    let storage = match args.token.as_deref() {
        Some(raw) => {
            let token = AuthToken::new(raw).ok_or_else(|| eyre!("token must not be blank"))?;
            InMemoryTokenStorage::with_token(token)
        }
        None => InMemoryTokenStorage::new(),
    };
    Ok(Arc::new(storage))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    let base_url = config.effective_base_url();
    info!(version = sms_client::VERSION, %base_url, "Starting sms-client");

    let storage = token_storage(&args)?;
    let (session_tx, mut session_rx) = mpsc::unbounded_channel();
    let session_handler = SessionExpiryHandler::new(storage.clone(), session_tx);

    let client = ApiClient::new(Arc::new(ReqwestExecutor::new(base_url)?))
        .with_retry_policy(config.retry_policy())
        .with_timeout(config.timeout())
        .with_request_interceptor(RequestIdInterceptor)
        .with_token_storage(storage.clone())
        .with_response_interceptor(EnvelopeInterceptor)
        .with_auth_expired_handler(Arc::new(session_handler));

    let store = NotificationStore::new();
    let subscription = store.subscribe(|toasts| {
        for toast in toasts {
            info!(id = toast.id, kind = %toast.kind, message = %toast.message, "toast");
        }
    });
    let notifier = Notifier::new(store.clone()).with_durations(config.durations());

    let messages = TrackMessages::new(
        format!("Requesting {}", args.path),
        "Request completed",
        "Request failed",
    );
    match notifier.track(client.get(&args.path), messages).await {
        Ok(body) => println!("{}", serde_json::to_string_pretty(&body)?),
        Err(e) => {
            notifier.error(e.message.clone());
            eprintln!("error ({}): {}", e.status, e.message);
        }
    }

    while let Ok(SessionEvent::LoginRequired { reason }) = session_rx.try_recv() {
        warn!(?reason, "Session expired, login required");
        eprintln!("session expired, please log in again");
    }

    if storage.has_token().await? {
        info!("Session token still valid");
    }

    subscription.unsubscribe();
    store.dispose();

    Ok(())
}
