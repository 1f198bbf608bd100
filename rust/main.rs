mod config;
mod error;
mod logger;
mod models;
mod poller;
mod practicum;
mod telegram;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use chrono::Utc;

use crate::config::Config;
use crate::error::ConfigError;
use crate::poller::Poller;
use crate::practicum::PracticumClient;
use crate::telegram::TelegramBot;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    logger::init_logging(&config::log_file())?;

    let config = load_config(Config::from_env())?;
    tracing::debug!(?config, "Configuration loaded");

    let source = PracticumClient::new(&config.endpoint, &config.practicum_token);
    let bot = TelegramBot::new(
        &config.telegram_api_url,
        &config.telegram_token,
        &config.telegram_chat_id,
    );
    let checkpoint = config.initial_checkpoint(Utc::now().timestamp());

    tracing::info!(chat_id = %config.telegram_chat_id, "Starting homework status bot");
    Poller::new(source, bot, checkpoint, config.retry_period)
        .run()
        .await;

    Ok(())
}

/// Logs one error line per missing variable and turns the failure into the exit error.
fn load_config(loaded: Result<Config, ConfigError>) -> Result<Config> {
    match loaded {
        Ok(config) => Ok(config),
        Err(ConfigError::Missing(missing)) => {
            for variable in &missing {
                tracing::error!(variable, "Missing required environment variable");
            }
            anyhow::bail!("{}", ConfigError::Missing(missing));
        }
    }
}
