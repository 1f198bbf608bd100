use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use crate::error::CycleError;

/// Source of raw homework status answers.
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// Fetches statuses changed since `from_date` (Unix seconds).
    async fn fetch(&self, from_date: i64) -> Result<Value, CycleError>;
}

#[derive(Clone)]
pub struct PracticumClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, CycleError> {
        tracing::debug!(from_date, endpoint = %self.endpoint, "Requesting homework statuses");

        let resp = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|err| CycleError::Transport(err.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CycleError::BadStatus(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|err| CycleError::Transport(err.to_string()))?;

        serde_json::from_str(&body).map_err(|err| CycleError::MalformedBody(err.to_string()))
    }
}
