//! Per-message pipeline
//!
//! classify → extract → format → send → update counters, one inbound
//! message at a time. A failure while handling a message is logged with
//! the offending content and never takes the loop down or reaches the
//! destination channel.

use crate::classify::{self, MessageKind};
use crate::error::Result;
use crate::extract;
use crate::format;
use crate::notify::MessageSink;
use crate::source::InboundMessage;
use crate::stats::StatsStore;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

pub struct Dispatcher {
    sink: Arc<dyn MessageSink>,
    store: Arc<RwLock<StatsStore>>,
}

impl Dispatcher {
    pub fn new(sink: Arc<dyn MessageSink>, store: Arc<RwLock<StatsStore>>) -> Self {
        Self { sink, store }
    }

    /// Consume inbound messages until the channel closes. Each message
    /// is fully processed, including the persistence write, before the
    /// next one is taken.
    pub async fn run(&self, mut rx: mpsc::Receiver<InboundMessage>) {
        while let Some(msg) = rx.recv().await {
            let preview: String = msg.text.chars().take(100).collect();
            tracing::info!("Received message: {}...", preview);

            if let Err(e) = self.handle(&msg.text).await {
                tracing::error!("Error processing message: {}", e);
                tracing::error!("Message content: {}", msg.text);
            }
        }

        tracing::info!("Message stream ended");
    }

    pub async fn handle(&self, text: &str) -> Result<()> {
        match classify::classify(text) {
            MessageKind::Signal => {
                let info = extract::extract(text);
                let formatted = format::signal_message(&info);

                self.sink.deliver(&formatted).await?;
                tracing::info!(
                    "Signal forwarded: {} - {}",
                    info.pair,
                    info.direction.as_str()
                );

                let mut store = self.store.write().await;
                store.record_signal();
            }
            MessageKind::Result => {
                let label = classify::result_label(text);

                // Counters first so the forwarded accuracy includes
                // this result
                let accuracy = {
                    let mut store = self.store.write().await;
                    store.record_result(label);
                    store.record().accuracy
                };

                let formatted = format::result_message(label, accuracy);
                self.sink.deliver(&formatted).await?;
                tracing::info!(
                    "Result forwarded: {} (accuracy {:.1}%)",
                    label.as_str(),
                    accuracy
                );
            }
            MessageKind::Unclassified => {
                tracing::debug!("Ignoring unclassified message");
            }
        }

        Ok(())
    }
}
