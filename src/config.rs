//! Configuration loading
//!
//! Loaded from a TOML file with an environment-variable overlay
//! (`SIGNAL_RELAY__TELEGRAM__BOT_TOKEN` etc).

use crate::error::{BotError, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Telegram channel identities and credentials
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Chat id of the monitored channel (e.g. -1001234567890)
    pub source_chat_id: i64,
    /// Chat id or @username of the destination channel
    pub target_chat_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatsConfig {
    /// Where the accuracy record is persisted
    #[serde(default = "default_stats_path")]
    pub path: String,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            path: default_stats_path(),
        }
    }
}

fn default_stats_path() -> String {
    "data/stats.json".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Local wall-clock hour at which the daily report fires
    #[serde(default = "default_report_hour")]
    pub hour: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            hour: default_report_hour(),
        }
    }
}

fn default_report_hour() -> u32 {
    22
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(
                config::Environment::with_prefix("SIGNAL_RELAY")
                    .separator("__"),
            )
            .build()?;

        let cfg: Config = settings.try_deserialize()?;

        if cfg.report.hour > 23 {
            return Err(BotError::InvalidConfig(format!(
                "report.hour must be 0-23, got {}",
                cfg.report.hour
            )));
        }

        Ok(cfg)
    }
}
