//! Inbound message sources
//!
//! The monitored channel is an external collaborator behind a trait: it
//! pushes raw text messages into an mpsc channel and the dispatch loop
//! consumes them one at a time, in arrival order.

pub mod telegram;

pub use telegram::TelegramSource;


use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

/// One raw message from the monitored channel
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A monitored channel that pushes messages into the pipeline
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Source name for logging
    fn name(&self) -> &str;

    /// Run until the receiving side closes or the source fails.
    async fn run(&self, tx: mpsc::Sender<InboundMessage>) -> Result<()>;
}
