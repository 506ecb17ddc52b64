//! Telegram delivery
//!
//! Sends formatted messages to the destination channel via the Bot API.
//! Failures are returned to the caller and never forwarded to the
//! channel itself.

use crate::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

/// Outbound delivery seam. The dispatch path and the scheduler talk to
/// this instead of the concrete notifier so they can run against a
/// recording sink in tests.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn deliver(&self, text: &str) -> Result<()>;
}

/// Telegram notifier for the destination channel
pub struct Notifier {
    http: Client,
    bot_token: String,
    chat_id: String,
    enabled: bool,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest {
    chat_id: String,
    text: String,
    parse_mode: String,
}

impl Notifier {
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self {
            http: Client::new(),
            bot_token,
            chat_id,
            enabled: true,
        }
    }

    /// A notifier that silently drops everything, for running without
    /// delivery configured.
    pub fn disabled() -> Self {
        Self {
            http: Client::new(),
            bot_token: String::new(),
            chat_id: String::new(),
            enabled: false,
        }
    }

    pub async fn send(&self, text: &str) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let url = format!(
            "https://api.telegram.org/bot{}/sendMessage",
            self.bot_token
        );

        let request = SendMessageRequest {
            chat_id: self.chat_id.clone(),
            text: text.to_string(),
            parse_mode: "Markdown".to_string(),
        };

        let response = self.http.post(&url).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(BotError::Api(format!(
                "sendMessage returned {}",
                response.status()
            )));
        }

        Ok(())
    }

    pub async fn startup(&self) -> Result<()> {
        self.send("🤖 **Signal relay online**\n\nWatching for new signals...")
            .await
    }
}

#[async_trait]
impl MessageSink for Notifier {
    async fn deliver(&self, text: &str) -> Result<()> {
        self.send(text).await
    }
}
