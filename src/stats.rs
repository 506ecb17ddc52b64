//! Accuracy statistics
//!
//! A small durable win/loss record for the current reporting period,
//! rewritten in full to a JSON file after every mutation. Read failures
//! at startup fall back to a fresh zero record; write failures are
//! logged and swallowed, the in-memory record stays authoritative.

use crate::classify::ResultLabel;
use crate::error::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Running accuracy counters for the current period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    pub total_signals: u64,
    pub wins: u64,
    pub losses: u64,
    /// Last stored accuracy percentage; refreshed when a result is
    /// recorded, not on every signal
    pub accuracy: f64,
    pub start_date: NaiveDate,
    pub last_reset: DateTime<Utc>,
}

impl StatsRecord {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            total_signals: 0,
            wins: 0,
            losses: 0,
            accuracy: 0.0,
            start_date: now.date_naive(),
            last_reset: now,
        }
    }

    /// Accuracy percentage in [0, 100], rounded to one decimal place.
    /// 0.0 when no signals have been counted.
    pub fn accuracy(&self) -> f64 {
        if self.total_signals == 0 {
            return 0.0;
        }
        let pct = self.wins as f64 / self.total_signals as f64 * 100.0;
        (pct * 10.0).round() / 10.0
    }
}

/// Owns the record and its backing file
pub struct StatsStore {
    path: PathBuf,
    record: StatsRecord,
}

impl StatsStore {
    /// Load the persisted record, or start fresh if the file is missing
    /// or unreadable.
    pub fn load_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let record = match Self::read(&path) {
            Ok(record) => {
                tracing::info!("Loaded stats from {}", path.display());
                record
            }
            Err(e) => {
                tracing::info!(
                    "Starting with fresh stats ({}: {})",
                    path.display(),
                    e
                );
                StatsRecord::new(Utc::now())
            }
        };
        Self { path, record }
    }

    fn read(path: &Path) -> Result<StatsRecord> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn record(&self) -> &StatsRecord {
        &self.record
    }

    /// A signal was forwarded.
    pub fn record_signal(&mut self) {
        self.record.total_signals += 1;
        self.persist();
    }

    /// A result was forwarded. Wins bump the win counter, everything
    /// else bumps losses; stored accuracy is refreshed either way.
    pub fn record_result(&mut self, label: ResultLabel) {
        // A result can arrive before any signal was counted in the
        // current period; keep the denominator ahead of the numerator.
        if self.record.total_signals == 0 {
            self.record.total_signals = self.record.wins + 1;
        }
        if label.is_win() {
            self.record.wins += 1;
        }
        self.record.accuracy = self.record.accuracy();
        if !label.is_win() {
            self.record.losses += 1;
        }
        self.persist();
    }

    /// Zero the counters for a new period. `start_date` is untouched.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.record.total_signals = 0;
        self.record.wins = 0;
        self.record.losses = 0;
        self.record.accuracy = 0.0;
        self.record.last_reset = now;
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.write() {
            tracing::warn!(
                "Failed to persist stats to {}: {}",
                self.path.display(),
                e
            );
        }
    }

    fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string_pretty(&self.record)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
