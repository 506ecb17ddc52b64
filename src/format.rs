//! Outbound message templates
//!
//! Pure string construction. The templates are fixed; only the extracted
//! fields, the result label and the counters vary. Bold markers are
//! rendered by Telegram's Markdown parse mode.

use crate::classify::ResultLabel;
use crate::extract::{Direction, SignalInfo};
use crate::stats::StatsRecord;
use chrono::{DateTime, Local};

/// Render a reformatted signal announcement.
pub fn signal_message(info: &SignalInfo) -> String {
    let direction_emoji = match info.direction {
        Direction::Call => "📈",
        Direction::Put => "📉",
    };

    // Entry is displayed as HH:MM, first five characters only
    let entry_display: String = info.entry_time.chars().take(5).collect();

    format!(
        "**🔥BILLIONAIRE BOSS🔥**

**🚀 PAIR  : {pair}**
**🧭 TIME : 1 M [+ 5:30 ]**

**⏳ EXPIRY : {entry} TO {expiry}**

**⚙️DIRECTION⚙️ GO FOR {direction} {emoji}**

           **🔔AUTO MTG 1🔔**",
        pair = info.pair,
        entry = entry_display,
        expiry = info.expiry_time,
        direction = info.direction.as_str(),
        emoji = direction_emoji,
    )
}

/// Render a result announcement with the current accuracy.
pub fn result_message(label: ResultLabel, accuracy: f64) -> String {
    format!(
        "**🔥BILLIONAIRE BOSS🔥**

**🚀RESULT  : - {result}**

**📈 ACCURACY - {accuracy:.1}%**

**🚀 Stay tuned for the next signal!**",
        result = label.as_str(),
        accuracy = accuracy,
    )
}

/// Render the end-of-day summary.
pub fn daily_report(record: &StatsRecord, now: DateTime<Local>) -> String {
    format!(
        "**🔥BILLIONAIRE BOSS🔥**

**📊 DAILY REPORT - {date}**

**🚀 TOTAL SIGNALS : {total}**
**✅ WINS : {wins}**
**❌ LOSSES : {losses}**
**📈 ACCURACY - {accuracy:.1}%**

**{commentary}**",
        date = now.format("%Y-%m-%d %H:%M"),
        total = record.total_signals,
        wins = record.wins,
        losses = record.losses,
        accuracy = record.accuracy,
        commentary = performance_commentary(record.accuracy),
    )
}

fn performance_commentary(accuracy: f64) -> &'static str {
    if accuracy >= 80.0 {
        "🔥 EXCELLENT PERFORMANCE! KEEP IT UP! 🔥"
    } else if accuracy >= 60.0 {
        "💪 SOLID PERFORMANCE TODAY 💪"
    } else if accuracy >= 40.0 {
        "📊 AVERAGE DAY - BETTER LUCK TOMORROW"
    } else {
        "🔄 TOUGH DAY - WE COME BACK STRONGER 🔄"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_signal() -> SignalInfo {
        SignalInfo {
            pair: "NZDJPY-OTC".to_string(),
            entry_time: "14:30:00".to_string(),
            expiry_time: "14:31".to_string(),
            direction: Direction::Put,
        }
    }

    #[test]
    fn test_signal_message_fields() {
        let msg = signal_message(&sample_signal());
        assert!(msg.contains("NZDJPY-OTC"));
        assert!(msg.contains("14:30 TO 14:31"));
        assert!(msg.contains("GO FOR PUT 📉"));
        assert!(msg.contains("🔔AUTO MTG 1🔔"));
    }

    #[test]
    fn test_signal_message_call_glyph() {
        let mut info = sample_signal();
        info.direction = Direction::Call;
        let msg = signal_message(&info);
        assert!(msg.contains("GO FOR CALL 📈"));
    }

    #[test]
    fn test_signal_message_entry_truncated() {
        let msg = signal_message(&sample_signal());
        // HH:MM only, seconds dropped
        assert!(msg.contains("EXPIRY : 14:30 TO"));
        assert!(!msg.contains("14:30:00"));
    }

    #[test]
    fn test_result_message_win() {
        let msg = result_message(ResultLabel::Win, 42.9);
        assert!(msg.contains("RESULT  : - WIN ✅"));
        assert!(msg.contains("ACCURACY - 42.9%"));
        assert!(msg.contains("Stay tuned"));
    }

    #[test]
    fn test_result_message_accuracy_one_decimal() {
        let msg = result_message(ResultLabel::Loss, 100.0);
        assert!(msg.contains("ACCURACY - 100.0%"));
        let msg = result_message(ResultLabel::HeartbreakLoss, 0.0);
        assert!(msg.contains("RESULT  : - LOSS 💔"));
        assert!(msg.contains("ACCURACY - 0.0%"));
    }

    #[test]
    fn test_daily_report_counters() {
        let mut record = StatsRecord::new(chrono::Utc::now());
        record.total_signals = 10;
        record.wins = 7;
        record.losses = 3;
        record.accuracy = 70.0;

        let now = Local.with_ymd_and_hms(2024, 6, 1, 22, 0, 0).unwrap();
        let msg = daily_report(&record, now);
        assert!(msg.contains("DAILY REPORT - 2024-06-01 22:00"));
        assert!(msg.contains("TOTAL SIGNALS : 10"));
        assert!(msg.contains("WINS : 7"));
        assert!(msg.contains("LOSSES : 3"));
        assert!(msg.contains("ACCURACY - 70.0%"));
    }

    #[test]
    fn test_performance_tiers() {
        assert!(performance_commentary(85.0).contains("EXCELLENT"));
        assert!(performance_commentary(80.0).contains("EXCELLENT"));
        assert!(performance_commentary(65.0).contains("SOLID"));
        assert!(performance_commentary(45.0).contains("AVERAGE"));
        assert!(performance_commentary(10.0).contains("TOUGH DAY"));
        assert!(performance_commentary(0.0).contains("TOUGH DAY"));
    }
}
