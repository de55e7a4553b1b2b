use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("status API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("status API returned {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error("status API returned a non-JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("status API rejected the request (code: {code}, error: {error})")]
    Rejected { code: String, error: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("API response is not a JSON object")]
    NotAMapping,
    #[error("API response has no `homeworks` key")]
    MissingHomeworks,
    #[error("`homeworks` in API response is not a list")]
    HomeworksNotASequence,
    #[error("homework record is not a JSON object")]
    RecordNotAMapping,
    #[error("homework record has no `homework_name`")]
    MissingHomeworkName,
    #[error("homework record has no `status`")]
    MissingStatus,
    #[error("unknown homework status: {0}")]
    UnknownStatus(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Telegram request failed: {0}")]
    Transport(reqwest::Error),
    #[error("Telegram API error: {status} - {description}")]
    Api { status: StatusCode, description: String },
}

// The request URL carries the bot token; keep it out of error text and logs.
impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        NotifyError::Transport(err.without_url())
    }
}

/// Failures of a single poll cycle. None of them stop the loop.
#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
