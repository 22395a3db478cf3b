//! Telegram delivery for poll-loop notifications.
//!
//! The sink is intentionally infallible from the caller's point of view: a
//! notification that cannot be delivered is logged and dropped. The poll loop
//! must keep running whether or not Telegram is reachable.

use std::future::Future;
use std::time::Duration;

use serde_json::json;
use thiserror::Error;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Per-request delivery timeout.
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can carry a notification to the operator.
///
/// `deliver` never fails: implementations absorb and record their own
/// delivery errors.
pub trait Notify {
    fn deliver(&self, text: &str) -> impl Future<Output = ()> + Send;
}

/// Why a single delivery attempt failed. Never leaves this crate's logging.
#[derive(Debug, Error)]
enum DeliveryError {
    #[error("request to the Bot API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Bot API rejected the message with HTTP {code}: {description}")]
    Rejected { code: u16, description: String },
}

/// Sends messages to one fixed chat through the Telegram Bot API.
pub struct TelegramNotifier {
    http: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: TELEGRAM_API_BASE.to_string(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Override the Bot API base URL. Used by tests to point at a local mock.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    async fn try_send(&self, text: &str) -> Result<(), DeliveryError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);

        let response = self
            .http
            .post(&url)
            .json(&json!({ "chat_id": self.chat_id, "text": text }))
            .timeout(SEND_TIMEOUT)
            .send()
            .await?;

        let code = response.status();
        if !code.is_success() {
            // Telegram puts the failure reason in the `description` field
            let description = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body.get("description")?.as_str().map(String::from))
                .unwrap_or_default();
            return Err(DeliveryError::Rejected {
                code: code.as_u16(),
                description,
            });
        }

        Ok(())
    }
}

impl Notify for TelegramNotifier {
    async fn deliver(&self, text: &str) {
        tracing::debug!("Attempting Telegram delivery");
        match self.try_send(text).await {
            Ok(()) => tracing::debug!("Telegram message delivered"),
            Err(e) => tracing::error!(error = %e, "Failed to deliver Telegram message"),
        }
    }
}
