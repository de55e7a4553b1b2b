use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::Config;
use crate::error::FetchError;
use crate::models::PollCursor;

/// Source of homework status snapshots.
#[async_trait]
pub trait HomeworkSource {
    async fn get_api_answer(&self, cursor: PollCursor) -> Result<Value, FetchError>;
}

#[derive(Clone)]
pub struct PracticumClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            token: config.practicum_token.clone(),
        })
    }
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    async fn get_api_answer(&self, cursor: PollCursor) -> Result<Value, FetchError> {
        tracing::debug!(cursor, endpoint = %self.endpoint, "Requesting homework statuses");

        let resp = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", cursor)])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        decode_body(status, &body)
    }
}

fn decode_body(status: StatusCode, body: &str) -> Result<Value, FetchError> {
    if status != StatusCode::OK {
        return Err(FetchError::UnexpectedStatus {
            status,
            body: body.to_string(),
        });
    }

    let value: Value = serde_json::from_str(body)?;

    // The API reports some failures in-band with a 200.
    if let Some(obj) = value.as_object() {
        if obj.contains_key("code") || obj.contains_key("error") {
            return Err(FetchError::Rejected {
                code: field_text(obj.get("code")),
                error: field_text(obj.get("error")),
            });
        }
    }

    Ok(value)
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    }
}
