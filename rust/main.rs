use anyhow::{Context, Result};
use chrono::Utc;

use homework_status_bot::bot::Bot;
use homework_status_bot::config::Config;
use homework_status_bot::logger;
use homework_status_bot::practicum::PracticumClient;
use homework_status_bot::telegram::TelegramNotifier;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logger::init_logging();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Required credentials are missing, exiting");
            return Err(err).context("Startup configuration failed");
        }
    };

    tracing::info!(
        endpoint = %config.endpoint,
        chat_id = %config.telegram_chat_id,
        "Starting homework status bot"
    );

    let source = PracticumClient::new(&config).context("Failed to build status API client")?;
    let notifier = TelegramNotifier::new(&config).context("Failed to build Telegram client")?;
    let cursor = Utc::now().timestamp();

    let mut bot = Bot::new(source, notifier, cursor, config.retry_period);
    bot.run().await;

    Ok(())
}
