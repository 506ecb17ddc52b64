//! Message classification
//!
//! Decides whether an inbound channel message is a trading signal, a
//! trade result, or noise. Matching is case-sensitive literal substring
//! containment plus one currency-pair token regex; the upstream channel
//! formats vary their emoji and spacing, hence the multiple variants per
//! indicator.

use regex::Regex;
use std::sync::LazyLock;

/// Category of an inbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Signal,
    Result,
    Unclassified,
}

/// Outcome label for a result announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultLabel {
    Win,
    HeartbreakLoss,
    Loss,
}

impl ResultLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultLabel::Win => "WIN ✅",
            ResultLabel::HeartbreakLoss => "LOSS 💔",
            ResultLabel::Loss => "LOSS ❌",
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, ResultLabel::Win)
    }
}

const SIGNAL_INDICATORS: &[&str] = &[
    "One Minute Trade",
    "1 MINT",
    "ENTRY TIME",
    "Premium Signal",
    "DOWN 🔴",
    "UP 🟢",
    "🔴 DOWN 🔴",
    "🟢 UP 🟢",
    "TIME ZONE UTC",
];

const RESULT_INDICATORS: &[&str] = &[
    "WIN ✅",
    "WIN✅",
    "WIN ✓",
    "LOSS ❌",
    "LOSS❌",
    "LOSS ✗",
    "💔 Loss",
    "💔Loss",
    "Loss 💔",
];

const WIN_INDICATORS: &[&str] = &["WIN ✅", "WIN✅", "WIN ✓"];

const HEARTBREAK_INDICATORS: &[&str] = &["💔 Loss", "💔Loss", "Loss 💔"];

/// Matches pair tokens like NZDJPY-OTC
static PAIR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]{3,6}[-][A-Z]{3}").expect("pair token regex"));

/// Classify a raw message. Signal wins over Result when both match.
pub fn classify(text: &str) -> MessageKind {
    if is_signal(text) {
        MessageKind::Signal
    } else if is_result(text) {
        MessageKind::Result
    } else {
        MessageKind::Unclassified
    }
}

pub fn is_signal(text: &str) -> bool {
    SIGNAL_INDICATORS.iter().any(|ind| text.contains(ind))
        || PAIR_TOKEN.is_match(text)
        || text.contains("OTC")
}

pub fn is_result(text: &str) -> bool {
    RESULT_INDICATORS.iter().any(|ind| text.contains(ind))
}

/// Derive the win/loss label for a message already classified as Result.
pub fn result_label(text: &str) -> ResultLabel {
    if WIN_INDICATORS.iter().any(|ind| text.contains(ind)) {
        ResultLabel::Win
    } else if HEARTBREAK_INDICATORS.iter().any(|ind| text.contains(ind)) {
        ResultLabel::HeartbreakLoss
    } else {
        ResultLabel::Loss
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_by_indicator() {
        assert_eq!(classify("🕐 10:15:00 ENTRY TIME"), MessageKind::Signal);
        assert_eq!(classify("Premium Signal incoming"), MessageKind::Signal);
        assert_eq!(classify("One Minute Trade setup"), MessageKind::Signal);
        assert_eq!(classify("🔴 DOWN 🔴"), MessageKind::Signal);
    }

    #[test]
    fn test_signal_by_pair_token() {
        assert_eq!(classify("NZDJPY-OTC looking good"), MessageKind::Signal);
        assert_eq!(classify("trade EURUSD-OTC now"), MessageKind::Signal);
    }

    #[test]
    fn test_signal_by_otc_substring() {
        assert_eq!(classify("next one is OTC"), MessageKind::Signal);
    }

    #[test]
    fn test_result_variants() {
        assert_eq!(classify("WIN ✅"), MessageKind::Result);
        assert_eq!(classify("WIN✅"), MessageKind::Result);
        assert_eq!(classify("WIN ✓"), MessageKind::Result);
        assert_eq!(classify("LOSS ❌"), MessageKind::Result);
        assert_eq!(classify("LOSS❌"), MessageKind::Result);
        assert_eq!(classify("LOSS ✗"), MessageKind::Result);
        assert_eq!(classify("💔 Loss"), MessageKind::Result);
        assert_eq!(classify("Loss 💔"), MessageKind::Result);
    }

    #[test]
    fn test_signal_takes_precedence_over_result() {
        // Contains both an entry marker and a win marker
        let text = "ENTRY TIME 10:15:00 — last one was WIN ✅";
        assert_eq!(classify(text), MessageKind::Signal);
    }

    #[test]
    fn test_unclassified() {
        assert_eq!(classify("good morning everyone"), MessageKind::Unclassified);
        assert_eq!(classify(""), MessageKind::Unclassified);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(classify("otc session open"), MessageKind::Unclassified);
        assert_eq!(classify("win ✅"), MessageKind::Unclassified);
        assert_eq!(classify("entry time 10:15:00"), MessageKind::Unclassified);
    }

    #[test]
    fn test_result_label_win() {
        assert_eq!(result_label("big WIN ✅ today"), ResultLabel::Win);
        assert_eq!(result_label("WIN✓ nope WIN ✓"), ResultLabel::Win);
        assert!(result_label("WIN✅").is_win());
    }

    #[test]
    fn test_result_label_heartbreak() {
        assert_eq!(result_label("💔 Loss"), ResultLabel::HeartbreakLoss);
        assert_eq!(result_label("Loss 💔"), ResultLabel::HeartbreakLoss);
        assert_eq!(result_label("💔 Loss").as_str(), "LOSS 💔");
    }

    #[test]
    fn test_result_label_generic_loss() {
        assert_eq!(result_label("LOSS ❌"), ResultLabel::Loss);
        assert_eq!(result_label("LOSS ✗"), ResultLabel::Loss);
        assert_eq!(result_label("LOSS ❌").as_str(), "LOSS ❌");
    }

    #[test]
    fn test_win_beats_heartbreak_in_label() {
        // Win indicators are checked before the loss variants
        assert_eq!(result_label("WIN ✅ after 💔 Loss streak"), ResultLabel::Win);
    }
}
