use anyhow::Context;

use homework_bot::config;
use homework_bot::jobs::poller::Poller;
use homework_bot::logging;
use homework_bot::notification::telegram::TelegramNotifier;
use homework_bot::practicum::client::PracticumClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    logging::init(&config::LogConfig::from_env())?;

    // Credentials are checked before any client exists: no partial start.
    let cfg = match config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "CRITICAL: required environment is incomplete, shutting down");
            return Err(e.into());
        }
    };
    tracing::debug!(config = ?cfg, "configuration loaded");

    let client = PracticumClient::new(&cfg).context("failed to build review API client")?;
    let notifier = TelegramNotifier::new(&cfg);
    let window = chrono::Utc::now().timestamp();

    Poller::new(client, notifier, cfg.retry_interval, window)
        .run()
        .await;

    Ok(())
}
