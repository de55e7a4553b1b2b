use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::error::{BotError, ValidationError};
use crate::models::{HomeworkRecord, PollCursor, Verdict};
use crate::practicum::HomeworkSource;
use crate::telegram::Notifier;

const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Returns the `homeworks` list of an API answer.
pub fn check_response(response: &Value) -> Result<&[Value], ValidationError> {
    let obj = response.as_object().ok_or(ValidationError::NotAMapping)?;
    let homeworks = obj.get("homeworks").ok_or(ValidationError::MissingHomeworks)?;
    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or(ValidationError::HomeworksNotASequence)
}

pub fn parse_homework(homework: &Value) -> Result<HomeworkRecord, ValidationError> {
    let obj = homework.as_object().ok_or(ValidationError::RecordNotAMapping)?;

    let name = obj
        .get("homework_name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or(ValidationError::MissingHomeworkName)?;

    let status = match obj.get("status") {
        None | Some(Value::Null) => return Err(ValidationError::MissingStatus),
        Some(Value::String(code)) => code.parse::<Verdict>()?,
        Some(other) => return Err(ValidationError::UnknownStatus(other.to_string())),
    };

    Ok(HomeworkRecord {
        name: name.to_string(),
        status,
    })
}

pub fn parse_status(homework: &Value) -> Result<String, ValidationError> {
    parse_homework(homework).map(|record| record.status_message())
}

/// Sends `text`, logging and swallowing delivery failures.
pub async fn send_message<N: Notifier + ?Sized>(notifier: &N, text: &str) -> bool {
    match notifier.send(text).await {
        Ok(()) => {
            tracing::debug!(text, "Message sent");
            true
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to send message");
            false
        }
    }
}

/// Owns the polling state between cycles.
pub struct Bot<S, N> {
    source: S,
    notifier: N,
    retry_period: Duration,
    cursor: PollCursor,
    last_statuses: HashMap<String, Verdict>,
    last_failure: Option<String>,
}

impl<S, N> Bot<S, N>
where
    S: HomeworkSource,
    N: Notifier,
{
    pub fn new(source: S, notifier: N, cursor: PollCursor, retry_period: Duration) -> Self {
        Self {
            source,
            notifier,
            retry_period,
            cursor,
            last_statuses: HashMap::new(),
            last_failure: None,
        }
    }

    pub fn cursor(&self) -> PollCursor {
        self.cursor
    }

    pub async fn run(&mut self) {
        tracing::info!(
            cursor = self.cursor,
            retry_period_secs = self.retry_period.as_secs(),
            "Polling homework statuses"
        );
        loop {
            self.run_cycle().await;
            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// One fetch-validate-notify pass. Never fails; errors are reported.
    pub async fn run_cycle(&mut self) {
        match self.poll().await {
            Ok(sent) => {
                self.last_failure = None;
                if sent == 0 {
                    tracing::debug!(cursor = self.cursor, "No status changes");
                } else {
                    tracing::info!(count = sent, cursor = self.cursor, "Status changes sent");
                }
            }
            Err(err) => self.report_failure(&err).await,
        }
    }

    async fn poll(&mut self) -> Result<usize, BotError> {
        let response = self.source.get_api_answer(self.cursor).await?;
        let homeworks = check_response(&response)?;

        // Validate everything before sending so a bad record does not leave
        // half of a batch announced.
        let records = homeworks
            .iter()
            .rev()
            .map(parse_homework)
            .collect::<Result<Vec<_>, _>>()?;

        if records.is_empty() {
            tracing::debug!("No homework in response");
        }

        let mut sent = 0;
        let mut undelivered = 0;
        for record in records {
            if self.last_statuses.get(&record.name) == Some(&record.status) {
                tracing::debug!(homework = %record.name, status = %record.status, "Status unchanged");
                continue;
            }
            if send_message(&self.notifier, &record.status_message()).await {
                tracing::info!(homework = %record.name, status = %record.status, "Status change sent");
                self.last_statuses.insert(record.name, record.status);
                sent += 1;
            } else {
                undelivered += 1;
            }
        }

        // Ask for the same window again so undelivered changes come back.
        if undelivered > 0 {
            tracing::warn!(count = undelivered, cursor = self.cursor, "Status changes not delivered, keeping cursor");
            return Ok(sent);
        }

        match response.get("current_date").and_then(Value::as_i64) {
            Some(current_date) => self.cursor = current_date,
            None => tracing::warn!(cursor = self.cursor, "Response has no current_date, keeping cursor"),
        }

        Ok(sent)
    }

    async fn report_failure(&mut self, err: &BotError) {
        tracing::error!(error = %err, "Poll cycle failed");

        let message = format!("{FAILURE_PREFIX}: {err}");
        if self.last_failure.as_deref() == Some(message.as_str()) {
            tracing::debug!("Same failure already reported");
            return;
        }
        if send_message(&self.notifier, &message).await {
            self.last_failure = Some(message);
        }
    }
}
