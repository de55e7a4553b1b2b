use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_PERIOD: Duration = Duration::from_secs(600);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

#[derive(Debug, Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub endpoint: String,
    pub retry_period: Duration,
    pub request_timeout: Duration,
}

/// True when all three credentials are present and non-blank.
pub fn check_tokens(
    practicum_token: Option<&str>,
    telegram_token: Option<&str>,
    telegram_chat_id: Option<&str>,
) -> bool {
    missing_credentials(practicum_token, telegram_token, telegram_chat_id).is_empty()
}

fn missing_credentials(
    practicum_token: Option<&str>,
    telegram_token: Option<&str>,
    telegram_chat_id: Option<&str>,
) -> Vec<&'static str> {
    [
        (PRACTICUM_TOKEN, practicum_token),
        (TELEGRAM_TOKEN, telegram_token),
        (TELEGRAM_CHAT_ID, telegram_chat_id),
    ]
    .into_iter()
    .filter(|(_, value)| value.map(|v| v.trim().is_empty()).unwrap_or(true))
    .map(|(name, _)| name)
    .collect()
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let practicum_token = lookup(PRACTICUM_TOKEN);
        // `TOKEN` and `ID` are the names older deployments use.
        let telegram_token = non_blank(lookup(TELEGRAM_TOKEN)).or_else(|| lookup("TOKEN"));
        let telegram_chat_id = non_blank(lookup(TELEGRAM_CHAT_ID)).or_else(|| lookup("ID"));

        if !check_tokens(
            practicum_token.as_deref(),
            telegram_token.as_deref(),
            telegram_chat_id.as_deref(),
        ) {
            return Err(ConfigError::MissingCredentials(missing_credentials(
                practicum_token.as_deref(),
                telegram_token.as_deref(),
                telegram_chat_id.as_deref(),
            )));
        }

        let endpoint = non_blank(lookup("PRACTICUM_ENDPOINT")).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let retry_period = match lookup("RETRY_PERIOD") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(value = %raw, "Invalid RETRY_PERIOD, using default");
                    DEFAULT_RETRY_PERIOD
                }
            },
            None => DEFAULT_RETRY_PERIOD,
        };

        Ok(Self {
            practicum_token: trimmed(practicum_token),
            telegram_token: trimmed(telegram_token),
            telegram_chat_id: trimmed(telegram_chat_id),
            endpoint,
            retry_period,
            request_timeout: REQUEST_TIMEOUT.min(retry_period),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}
