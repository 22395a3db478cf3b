use thiserror::Error;

/// Yandex Practicum homework-status endpoint.
const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Seconds between poll iterations (default: 600 = 10 min).
const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

/// Startup-time configuration failure. Fatal — the poll loop is never entered.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),

    #[error("{0} must be a valid u64")]
    InvalidVar(&'static str),
}

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Practicum API token (sent as `Authorization: OAuth <token>`)
    pub practicum_token: String,

    /// Telegram bot token for notification delivery
    pub telegram_bot_token: String,

    /// Telegram chat that receives every notification
    pub telegram_chat_id: String,

    /// Homework-status endpoint URL
    pub endpoint: String,

    /// Seconds between poll iterations
    pub poll_interval_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            practicum_token: require("PRACTICUM_TOKEN")?,
            telegram_bot_token: require("TELEGRAM_BOT_TOKEN")?,
            telegram_chat_id: require("TELEGRAM_CHAT_ID")?,
            endpoint: std::env::var("HOMEWORK_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            poll_interval_secs: std::env::var("POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| DEFAULT_POLL_INTERVAL_SECS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidVar("POLL_INTERVAL_SECS"))?,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    const SECRETS: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_BOT_TOKEN", "TELEGRAM_CHAT_ID"];

    // Environment variables are process-global; these tests must not overlap
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_complete_env() {
        for name in SECRETS {
            unsafe { std::env::set_var(name, "secret") };
        }
        unsafe { std::env::remove_var("HOMEWORK_ENDPOINT") };
        unsafe { std::env::remove_var("POLL_INTERVAL_SECS") };
    }

    #[test]
    fn test_loads_with_all_secrets_and_defaults() {
        let _guard = env_guard();
        set_complete_env();

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.practicum_token, "secret");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.poll_interval_secs, DEFAULT_POLL_INTERVAL_SECS);
    }

    #[test]
    fn test_each_missing_secret_is_fatal() {
        let _guard = env_guard();

        for missing in SECRETS {
            set_complete_env();
            unsafe { std::env::remove_var(missing) };

            match AppConfig::from_env() {
                Err(ConfigError::MissingVar(name)) => assert_eq!(name, missing),
                other => panic!("expected MissingVar({missing}), got {other:?}"),
            }
        }
    }

    #[test]
    fn test_non_numeric_poll_interval_is_fatal() {
        let _guard = env_guard();
        set_complete_env();
        unsafe { std::env::set_var("POLL_INTERVAL_SECS", "soon") };

        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::InvalidVar("POLL_INTERVAL_SECS"))
        ));
    }
}
