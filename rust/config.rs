use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;
pub const DEFAULT_LOOKBACK_SECS: u32 = 600;
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_LOG_FILE: &str = "homework_bot.log";

pub const REQUIRED_VARS: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub endpoint: String,
    pub telegram_api_url: String,
    pub retry_period: Duration,
    pub lookback_secs: u32,
}

/// Log file path. Read on its own so logging is up before the config is validated.
pub fn log_file() -> String {
    env::var("LOG_FILE")
        .ok()
        .filter(|val| !val.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|val| !val.trim().is_empty());

        let values = REQUIRED_VARS.map(|key| get(key));
        let [Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)] = values.clone()
        else {
            let missing = REQUIRED_VARS
                .iter()
                .zip(&values)
                .filter(|(_, value)| value.is_none())
                .map(|(&key, _)| key)
                .collect();
            return Err(ConfigError::Missing(missing));
        };

        let retry_period_secs = get("RETRY_PERIOD_SECS")
            .and_then(|val| val.parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .unwrap_or(DEFAULT_RETRY_PERIOD_SECS);
        let lookback_secs = get("LOOKBACK_SECS")
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(DEFAULT_LOOKBACK_SECS);

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint: get("PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            telegram_api_url: get("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            retry_period: Duration::from_secs(retry_period_secs),
            lookback_secs,
        })
    }

    /// First `from_date` to request, `lookback_secs` before `now`.
    pub fn initial_checkpoint(&self, now: i64) -> i64 {
        now.saturating_sub(i64::from(self.lookback_secs))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_period", &self.retry_period)
            .field("lookback_secs", &self.lookback_secs)
            .finish()
    }
}
