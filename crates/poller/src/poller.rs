//! The poll loop: query, validate, render, deduplicate, deliver, sleep.
//!
//! Owns the only two pieces of mutable state in the system — the time-window
//! cursor and the last message actually handed to the sink. The cursor moves
//! forward only when a whole iteration succeeded, so a failed iteration
//! re-covers the same window instead of skipping it.

use std::time::Duration;

use chrono::Utc;

use sentinel_common::error::PollError;
use sentinel_notifier::Notify;

use crate::client::StatusClient;
use crate::report;
use crate::validate;

/// Fixed-interval homework-status poller.
pub struct StatusPoller<N: Notify> {
    client: StatusClient,
    notifier: N,
    poll_interval: Duration,
    /// Lower bound of the next query's time window (seconds since epoch).
    cursor: i64,
    /// Last notification handed to the sink; identical candidates are
    /// suppressed, whether or not the delivery itself succeeded.
    last_message: Option<String>,
}

impl<N: Notify> StatusPoller<N> {
    pub fn new(client: StatusClient, notifier: N, poll_interval_secs: u64) -> Self {
        // Start one interval in the past so changes made while the process
        // was down are still picked up
        let cursor = Utc::now().timestamp() - poll_interval_secs as i64;
        Self {
            client,
            notifier,
            poll_interval: Duration::from_secs(poll_interval_secs),
            cursor,
            last_message: None,
        }
    }

    /// Current time-window cursor.
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Start the polling loop. Runs until the task is cancelled.
    pub async fn run(&mut self) {
        tracing::info!(
            poll_interval_secs = self.poll_interval.as_secs(),
            start_cursor = self.cursor,
            "Status poller started"
        );

        loop {
            self.poll_and_notify().await;
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// One iteration: compute the candidate message and deliver it unless it
    /// repeats the previous one.
    pub async fn poll_and_notify(&mut self) {
        let candidate = match self.poll_once().await {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, cursor = self.cursor, "Poll iteration failed");
                report::render_failure(&e)
            }
        };

        if self.last_message.as_deref() == Some(candidate.as_str()) {
            tracing::debug!("Notification unchanged, delivery suppressed");
            return;
        }

        self.notifier.deliver(&candidate).await;
        self.last_message = Some(candidate);
    }

    /// Query, validate and render the most recent record, then advance the
    /// cursor. Any failure leaves the cursor untouched.
    async fn poll_once(&mut self) -> Result<String, PollError> {
        let payload = self.client.query(self.cursor).await?;
        let homeworks = validate::check_response(&payload)?;

        let message = match homeworks.first() {
            Some(record) => report::render_status(record)?,
            None => report::NO_UPDATES.to_string(),
        };

        self.cursor =
            validate::reported_cursor(&payload).unwrap_or_else(|| Utc::now().timestamp());

        Ok(message)
    }
}
