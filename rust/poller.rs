use std::time::Duration;

use crate::error::CycleError;
use crate::models::{check_response, parse_status, StatusUpdate};
use crate::practicum::HomeworkSource;
use crate::telegram::Notifier;

/// Status change found in one cycle, together with the next checkpoint.
struct CycleOutcome {
    update: StatusUpdate,
    current_date: Option<i64>,
}

/// Fetch, validate, notify, sleep. Owns the checkpoint and the last error sent.
pub struct Poller<S, N> {
    source: S,
    notifier: N,
    checkpoint: i64,
    last_error: Option<String>,
    retry_period: Duration,
}

impl<S, N> Poller<S, N>
where
    S: HomeworkSource,
    N: Notifier,
{
    pub fn new(source: S, notifier: N, checkpoint: i64, retry_period: Duration) -> Self {
        Self {
            source,
            notifier,
            checkpoint,
            last_error: None,
            retry_period,
        }
    }

    #[cfg(test)]
    pub fn checkpoint(&self) -> i64 {
        self.checkpoint
    }

    #[cfg(test)]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub async fn run(mut self) {
        tracing::info!(
            checkpoint = self.checkpoint,
            retry_period_secs = self.retry_period.as_secs(),
            "Starting homework status polling"
        );
        loop {
            self.poll_once().await;
            tokio::time::sleep(self.retry_period).await;
        }
    }

    pub async fn poll_once(&mut self) {
        match self.check_for_update().await {
            Ok(Some(outcome)) => {
                let message = outcome.update.message();
                tracing::info!(
                    homework = %outcome.update.homework_name,
                    status = %outcome.update.status,
                    "Homework status changed"
                );
                if self.send_message(&message).await {
                    self.last_error = None;
                    if let Some(current_date) = outcome.current_date {
                        self.checkpoint = current_date;
                    }
                }
            }
            Ok(None) => {
                tracing::debug!(checkpoint = self.checkpoint, "No new homework statuses");
            }
            Err(err) => {
                let message = format!("Сбой в работе программы: {err}");
                tracing::error!(kind = ?err.kind(), "{message}");
                self.report_error(message).await;
            }
        }
    }

    async fn check_for_update(&self) -> Result<Option<CycleOutcome>, CycleError> {
        let body = self.source.fetch(self.checkpoint).await?;
        let response = check_response(body)?;

        let Some(latest) = response.latest() else {
            return Ok(None);
        };
        let update = parse_status(latest)?;

        Ok(Some(CycleOutcome {
            update,
            current_date: response.current_date,
        }))
    }

    async fn report_error(&mut self, message: String) {
        if self.last_error.as_deref() == Some(message.as_str()) {
            tracing::debug!("Error already reported, not sending again");
            return;
        }
        if self.send_message(&message).await {
            self.last_error = Some(message);
        }
    }

    async fn send_message(&self, text: &str) -> bool {
        match self.notifier.send(text).await {
            Ok(()) => {
                tracing::debug!("Message sent");
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to send message");
                false
            }
        }
    }
}
