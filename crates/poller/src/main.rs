use sentinel_common::config::AppConfig;
use sentinel_notifier::TelegramNotifier;
use sentinel_poller::client::StatusClient;
use sentinel_poller::poller::StatusPoller;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sentinel_poller=info,sentinel_notifier=info".into()),
        )
        .init();

    tracing::info!("Homework Sentinel starting...");

    // Load configuration; a missing secret is the only fatal condition
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Configuration incomplete, refusing to start");
            std::process::exit(1);
        }
    };

    let client = StatusClient::new(config.endpoint.clone(), config.practicum_token.clone());
    let notifier = TelegramNotifier::new(config.telegram_bot_token.clone(), config.telegram_chat_id.clone());
    let mut poller = StatusPoller::new(client, notifier, config.poll_interval_secs);

    // Run with graceful shutdown on Ctrl+C
    tokio::select! {
        _ = poller.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
        }
    }

    tracing::info!("Homework Sentinel stopped.");
    Ok(())
}
