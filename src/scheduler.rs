//! Daily report scheduling
//!
//! The next firing instant is a pure rule over the current local time,
//! computed fresh every cycle; the loop just sleeps until it. On wake
//! the daily report is formatted, sent, and the stats reset for the new
//! period. A failed cycle backs off one hour so a persistent failure
//! delays reports instead of spinning.

use crate::error::Result;
use crate::format;
use crate::notify::MessageSink;
use crate::stats::StatsStore;
use chrono::{DateTime, Local, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

const FAILURE_BACKOFF: Duration = Duration::from_secs(3600);

/// Next occurrence of `hour:00:00` local time strictly after `now`.
/// At or past today's occurrence, the target is tomorrow's.
pub fn next_occurrence(now: DateTime<Local>, hour: u32) -> DateTime<Local> {
    let today = now
        .date_naive()
        .and_hms_opt(hour, 0, 0)
        .and_then(|t| t.and_local_timezone(Local).earliest());

    match today {
        Some(target) if target > now => target,
        _ => now
            .date_naive()
            .succ_opt()
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .and_then(|t| t.and_local_timezone(Local).earliest())
            .unwrap_or_else(|| now + chrono::Duration::hours(24)),
    }
}

/// Fires the daily report once per day at a fixed local hour
pub struct ReportScheduler {
    sink: Arc<dyn MessageSink>,
    store: Arc<RwLock<StatsStore>>,
    hour: u32,
}

impl ReportScheduler {
    pub fn new(
        sink: Arc<dyn MessageSink>,
        store: Arc<RwLock<StatsStore>>,
        hour: u32,
    ) -> Self {
        Self { sink, store, hour }
    }

    /// Run forever, one report per day.
    pub async fn run(self) {
        loop {
            if let Err(e) = self.cycle().await {
                tracing::error!("Daily report cycle failed: {}", e);
                tokio::time::sleep(FAILURE_BACKOFF).await;
            }
        }
    }

    async fn cycle(&self) -> Result<()> {
        let now = Local::now();
        let target = next_occurrence(now, self.hour);
        let wait = (target - now).to_std().unwrap_or(Duration::ZERO);

        tracing::info!(
            "Next daily report scheduled for {}",
            target.format("%Y-%m-%d %H:%M:%S")
        );
        tokio::time::sleep(wait).await;

        self.fire().await
    }

    /// Format and send the report, then start a fresh period.
    async fn fire(&self) -> Result<()> {
        let report = {
            let store = self.store.read().await;
            format::daily_report(store.record(), Local::now())
        };

        self.sink.deliver(&report).await?;

        let mut store = self.store.write().await;
        store.reset(Utc::now());
        tracing::info!("Daily report sent, stats reset");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_next_occurrence_later_today() {
        let now = Local.with_ymd_and_hms(2024, 5, 10, 21, 0, 0).unwrap();
        let target = next_occurrence(now, 22);
        assert_eq!(target, Local.with_ymd_and_hms(2024, 5, 10, 22, 0, 0).unwrap());
    }

    #[test]
    fn test_next_occurrence_already_past() {
        let now = Local.with_ymd_and_hms(2024, 5, 10, 22, 30, 0).unwrap();
        let target = next_occurrence(now, 22);
        assert_eq!(target, Local.with_ymd_and_hms(2024, 5, 11, 22, 0, 0).unwrap());
    }

    #[test]
    fn test_next_occurrence_exactly_at_hour_targets_tomorrow() {
        let now = Local.with_ymd_and_hms(2024, 5, 10, 22, 0, 0).unwrap();
        let target = next_occurrence(now, 22);
        assert_eq!(target, Local.with_ymd_and_hms(2024, 5, 11, 22, 0, 0).unwrap());
    }

    #[test]
    fn test_next_occurrence_month_boundary() {
        let now = Local.with_ymd_and_hms(2024, 5, 31, 23, 0, 0).unwrap();
        let target = next_occurrence(now, 22);
        assert_eq!(target, Local.with_ymd_and_hms(2024, 6, 1, 22, 0, 0).unwrap());
    }

    #[test]
    fn test_next_occurrence_other_hour() {
        let now = Local.with_ymd_and_hms(2024, 5, 10, 10, 0, 0).unwrap();
        let target = next_occurrence(now, 9);
        assert_eq!(target, Local.with_ymd_and_hms(2024, 5, 11, 9, 0, 0).unwrap());
    }
}
