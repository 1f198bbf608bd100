use async_trait::async_trait;
use serde::Serialize;

use crate::error::NotifyError;

/// Outbound text channel to the single tracked chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

#[derive(Clone)]
pub struct TelegramBot {
    http: reqwest::Client,
    api_url: String,
    token: String,
    chat_id: String,
}

impl TelegramBot {
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[async_trait]
impl Notifier for TelegramBot {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        // The token is part of the path; errors must not carry the URL into logs.
        let url = format!("{}/bot{}/sendMessage", self.api_url.trim_end_matches('/'), self.token);
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };

        let resp = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|err| NotifyError::Transport(err.without_url()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
