//! Alert delivery over a bot-style messaging API.
//!
//! Delivery outcomes are reported as values, never as propagated errors: one
//! missed alert must not block the rest of the run. The pipeline logs each
//! outcome and moves on.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use num_format::{Locale, ToFormattedString};
use serde::Serialize;

use crate::detector::AnomalyResult;
use crate::http_client::{HttpClient, HttpRequest};
use crate::Symbol;

/// Outcome of a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    Failed { reason: String },
}

impl Delivery {
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Formatted text plus its destination channel, sent as the JSON body of the
/// bot API call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertMessage {
    pub chat_id: String,
    pub text: String,
}

impl AlertMessage {
    pub fn new(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
        }
    }
}

/// Startup liveness message, sent once per run before any fetching.
pub fn liveness_text() -> String {
    String::from("volwatch is up: starting anomaly scan")
}

/// Render the per-ticker alert body from a triggered verdict.
pub fn format_alert(symbol: &Symbol, result: &AnomalyResult) -> String {
    format!(
        "Anomaly detected in {symbol}\n\
         Volume: {}\n\
         30-day average: {:.2}\n\
         Price change: {:.2}%",
        result.latest_volume.to_formatted_string(&Locale::en),
        result.rolling_avg,
        result.price_change_pct,
    )
}

/// Messaging delivery contract: exactly one attempt per call, destination
/// fixed at construction time.
pub trait Notifier: Send + Sync {
    fn send<'a>(&'a self, text: &'a str) -> Pin<Box<dyn Future<Output = Delivery> + Send + 'a>>;
}

/// Telegram bot API notifier.
#[derive(Clone)]
pub struct TelegramNotifier {
    http_client: Arc<dyn HttpClient>,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }

    async fn send_message(&self, text: &str) -> Delivery {
        let message = AlertMessage::new(&self.chat_id, text);
        let body = match serde_json::to_string(&message) {
            Ok(body) => body,
            Err(error) => {
                return Delivery::Failed {
                    reason: format!("failed to serialize message: {error}"),
                };
            }
        };

        let endpoint = format!("https://api.telegram.org/bot{}/sendMessage", self.token);
        let request = HttpRequest::post(endpoint)
            .with_json_body(body)
            .with_timeout_ms(10_000);

        match self.http_client.execute(request).await {
            Ok(response) if response.is_success() => Delivery::Delivered,
            Ok(response) => Delivery::Failed {
                reason: format!("telegram returned status {}", response.status),
            },
            Err(error) => Delivery::Failed {
                reason: format!("telegram transport error: {}", error.message()),
            },
        }
    }
}

impl Notifier for TelegramNotifier {
    fn send<'a>(&'a self, text: &'a str) -> Pin<Box<dyn Future<Output = Delivery> + Send + 'a>> {
        Box::pin(self.send_message(text))
    }
}
