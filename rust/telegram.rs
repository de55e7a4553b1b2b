use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::NotifyError;

const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Delivers text to the single configured recipient.
#[async_trait]
pub trait Notifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

#[derive(Clone)]
pub struct TelegramNotifier {
    http: reqwest::Client,
    url: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            url: format!("{}/bot{}/sendMessage", TELEGRAM_API_URL, config.telegram_token),
            chat_id: config.telegram_chat_id.clone(),
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };

        let resp = self.http.post(&self.url).json(&request).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        decode_response(status, &body)
    }
}

fn decode_response(status: StatusCode, body: &str) -> Result<(), NotifyError> {
    match serde_json::from_str::<SendMessageResponse>(body) {
        Ok(SendMessageResponse { ok: true, .. }) if status.is_success() => Ok(()),
        Ok(SendMessageResponse { description, .. }) => Err(NotifyError::Api {
            status,
            description: description.unwrap_or_else(|| body.to_string()),
        }),
        Err(_) => Err(NotifyError::Api {
            status,
            description: body.to_string(),
        }),
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    description: Option<String>,
}
