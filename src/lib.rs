//! Telegram Trading-Signal Relay Bot
//!
//! Watches a source channel, reformats the signal and result
//! announcements it recognizes, forwards them to a target channel, and
//! keeps a daily win/loss accuracy record.
//!
//! ## Architecture
//!
//! ```text
//! Source (Telegram) → Dispatch → Classify → Extract → Format → Notifier
//!                                    ↓
//!                          Stats (accuracy record, persisted)
//!                                    ↑
//!                      Scheduler (daily report + reset)
//! ```

pub mod classify;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod format;
pub mod notify;
pub mod scheduler;
pub mod source;
pub mod stats;
