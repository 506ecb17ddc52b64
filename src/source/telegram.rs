//! Telegram channel monitoring
//!
//! Long-polls the Bot API `getUpdates` endpoint and forwards new posts
//! from the configured source chat. Channel posts and plain group
//! messages are both accepted.

use super::{InboundMessage, MessageSource};
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::mpsc;

pub struct TelegramSource {
    http: Client,
    bot_token: String,
    source_chat_id: i64,
}

#[derive(Debug, Deserialize)]
struct GetUpdatesResponse {
    ok: bool,
    #[serde(default)]
    result: Vec<TelegramUpdate>,
}

#[derive(Debug, Deserialize)]
struct TelegramUpdate {
    update_id: i64,
    message: Option<TelegramMessage>,
    channel_post: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
struct TelegramMessage {
    message_id: i64,
    chat: TelegramChat,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TelegramChat {
    id: i64,
}

impl TelegramSource {
    pub fn new(bot_token: String, source_chat_id: i64) -> Self {
        Self {
            http: Client::new(),
            bot_token,
            source_chat_id,
        }
    }

    async fn poll(&self, offset: i64) -> Result<GetUpdatesResponse> {
        let url = format!(
            "https://api.telegram.org/bot{}/getUpdates?offset={}&timeout=30",
            self.bot_token, offset
        );

        Ok(self.http.get(&url).send().await?.json().await?)
    }
}

#[async_trait]
impl MessageSource for TelegramSource {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn run(&self, tx: mpsc::Sender<InboundMessage>) -> Result<()> {
        tracing::info!(
            "Telegram source starting, monitoring chat {}",
            self.source_chat_id
        );

        let mut last_update_id: i64 = 0;

        loop {
            let updates = match self.poll(last_update_id + 1).await {
                Ok(resp) if resp.ok => resp.result,
                Ok(_) => {
                    tracing::warn!("getUpdates returned ok=false");
                    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                    continue;
                }
                Err(e) => {
                    tracing::warn!("Telegram API error: {}", e);
                    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                    continue;
                }
            };

            for update in updates {
                last_update_id = update.update_id;

                // Channels deliver channel_post, groups deliver message
                if let Some(post) = update.channel_post.or(update.message) {
                    if post.chat.id != self.source_chat_id {
                        continue;
                    }

                    if let Some(text) = post.text {
                        let inbound = InboundMessage {
                            chat_id: post.chat.id,
                            message_id: post.message_id,
                            text,
                            timestamp: Utc::now(),
                        };

                        if tx.send(inbound).await.is_err() {
                            tracing::warn!("Message channel closed, stopping source");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channel_post_update() {
        let json = r#"{
            "ok": true,
            "result": [{
                "update_id": 900001,
                "channel_post": {
                    "message_id": 42,
                    "chat": {"id": -1001234567890},
                    "text": "🕐 10:15:00 ENTRY TIME"
                }
            }]
        }"#;

        let resp: GetUpdatesResponse = serde_json::from_str(json).unwrap();
        assert!(resp.ok);
        assert_eq!(resp.result.len(), 1);

        let update = &resp.result[0];
        assert_eq!(update.update_id, 900001);
        let post = update.channel_post.as_ref().unwrap();
        assert_eq!(post.message_id, 42);
        assert_eq!(post.chat.id, -1001234567890);
        assert_eq!(post.text.as_deref(), Some("🕐 10:15:00 ENTRY TIME"));
    }

    #[test]
    fn test_parse_group_message_update() {
        let json = r#"{
            "ok": true,
            "result": [{
                "update_id": 900002,
                "message": {
                    "message_id": 7,
                    "chat": {"id": 555},
                    "text": "WIN ✅"
                }
            }]
        }"#;

        let resp: GetUpdatesResponse = serde_json::from_str(json).unwrap();
        let update = &resp.result[0];
        assert!(update.channel_post.is_none());
        assert_eq!(update.message.as_ref().unwrap().text.as_deref(), Some("WIN ✅"));
    }

    #[test]
    fn test_parse_update_without_text() {
        // Photo-only posts carry no text field
        let json = r#"{
            "ok": true,
            "result": [{
                "update_id": 900003,
                "channel_post": {
                    "message_id": 8,
                    "chat": {"id": 555}
                }
            }]
        }"#;

        let resp: GetUpdatesResponse = serde_json::from_str(json).unwrap();
        assert!(resp.result[0].channel_post.as_ref().unwrap().text.is_none());
    }

    #[test]
    fn test_parse_empty_result() {
        let resp: GetUpdatesResponse =
            serde_json::from_str(r#"{"ok": true, "result": []}"#).unwrap();
        assert!(resp.ok);
        assert!(resp.result.is_empty());
    }
}
