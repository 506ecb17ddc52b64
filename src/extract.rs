//! Signal field extraction
//!
//! Pulls the instrument pair, entry time and trade direction out of a
//! message already classified as a signal. Each field tries an ordered
//! list of patterns, first match wins, with a documented default when
//! nothing matches. Expiry time is not extracted, it is derived as
//! entry + 1 minute.

use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_PAIR: &str = "UNKNOWN";
pub const DEFAULT_ENTRY_TIME: &str = "00:00:00";
pub const DEFAULT_EXPIRY_TIME: &str = "00:01";

/// Trade direction for a binary-options signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Call,
    Put,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Call => "CALL",
            Direction::Put => "PUT",
        }
    }
}

/// Fields extracted from a signal message
#[derive(Debug, Clone)]
pub struct SignalInfo {
    pub pair: String,
    /// "HH:MM:SS"
    pub entry_time: String,
    /// "HH:MM", always entry + 1 minute (or the default)
    pub expiry_time: String,
    pub direction: Direction,
}

/// Pair patterns in priority order: emoji-prefixed formats first, then
/// bare NZDJPY-OTC style tokens.
static PAIR_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"🀄\s*([A-Z]+[-]?[A-Z]*)",
        r"🔥\s*([A-Z]+[-]?[A-Z]*)",
        r"([A-Z]{3,6}[-][A-Z]{3})",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("pair pattern"))
    .collect()
});

/// Entry-time patterns in priority order, covering the marker before or
/// after the time, with or without the clock emoji.
static ENTRY_TIME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(\d{2}:\d{2}:\d{2})\s*ENTRY TIME",
        r"🕐\s*(\d{2}:\d{2}:\d{2})\s*ENTRY TIME",
        r"(\d{2}:\d{2}:\d{2})\s*ENTRY",
        r"ENTRY TIME\s*(\d{2}:\d{2}:\d{2})",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("entry time pattern"))
    .collect()
});

const DOWN_INDICATORS: &[&str] = &["🔴 DOWN 🔴", "DOWN 🔴", "🔴DOWN🔴", "DOWN"];
const UP_INDICATORS: &[&str] = &["🟢 UP 🟢", "UP 🟢", "🟢UP🟢", "UP"];

/// Extract signal fields from a message. Never fails; every field has a
/// fallback default.
pub fn extract(text: &str) -> SignalInfo {
    let pair = first_capture(&PAIR_PATTERNS, text).unwrap_or_else(|| DEFAULT_PAIR.to_string());

    let entry_time = first_capture(&ENTRY_TIME_PATTERNS, text)
        .unwrap_or_else(|| DEFAULT_ENTRY_TIME.to_string());

    // DOWN is checked first; a bare "DOWN" substring already matches it,
    // and text with neither marker stays at the CALL default.
    let direction = if DOWN_INDICATORS.iter().any(|ind| text.contains(ind)) {
        Direction::Put
    } else if UP_INDICATORS.iter().any(|ind| text.contains(ind)) {
        Direction::Call
    } else {
        Direction::Call
    };

    let expiry_time = expiry_after(&entry_time);

    SignalInfo {
        pair,
        entry_time,
        expiry_time,
        direction,
    }
}

fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|re| re.captures(text).map(|caps| caps[1].to_string()))
}

/// Entry + 1 minute as "HH:MM", with minute overflow carrying into the
/// hour and hour 24 wrapping to 0. A default or unparseable entry yields
/// the literal default expiry.
fn expiry_after(entry_time: &str) -> String {
    if entry_time == DEFAULT_ENTRY_TIME {
        return DEFAULT_EXPIRY_TIME.to_string();
    }

    match parse_hms(entry_time) {
        Some((hour, minute, _sec)) => {
            let mut expiry_min = minute + 1;
            let mut expiry_hour = hour;
            if expiry_min >= 60 {
                expiry_min = 0;
                expiry_hour += 1;
                if expiry_hour >= 24 {
                    expiry_hour = 0;
                }
            }
            format!("{:02}:{:02}", expiry_hour, expiry_min)
        }
        None => DEFAULT_EXPIRY_TIME.to_string(),
    }
}

fn parse_hms(time: &str) -> Option<(u32, u32, u32)> {
    let mut parts = time.split(':');
    let hour = parts.next()?.parse().ok()?;
    let minute = parts.next()?.parse().ok()?;
    let sec = parts.next()?.parse().ok()?;
    Some((hour, minute, sec))
}
