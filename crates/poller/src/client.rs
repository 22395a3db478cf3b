//! HTTP client for the homework-status endpoint.
//!
//! One request per call, no retries — the retry discipline lives in the poll
//! loop. The outcome is classified into the [`PollError`] taxonomy so the
//! driver has a single decision point.

use std::time::Duration;

use chrono::Utc;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;

use sentinel_common::error::PollError;

/// Per-request timeout so a hung endpoint cannot stall the loop.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Queries the grading service for homework-status changes.
pub struct StatusClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl StatusClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    /// Fetch every status change since `cursor` (seconds since epoch).
    ///
    /// A zero or negative cursor falls back to the current wall-clock time.
    /// Returns the decoded payload as raw JSON; shape validation is the
    /// caller's job.
    pub async fn query(&self, cursor: i64) -> Result<serde_json::Value, PollError> {
        let from_date = if cursor > 0 { cursor } else { Utc::now().timestamp() };

        let response = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(PollError::Transport)?;

        let code = response.status();
        if code != StatusCode::OK {
            return Err(PollError::Remote { code: code.as_u16() });
        }

        let body = response.text().await.map_err(PollError::Transport)?;
        let payload = serde_json::from_str(&body).map_err(PollError::MalformedResponse)?;

        tracing::debug!(from_date, "Status endpoint answered");
        Ok(payload)
    }
}
