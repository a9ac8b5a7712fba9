// ============================================================
// Layer 3 — Label Domain Type
// ============================================================
// The category assigned to a sentence. There are exactly two.
//
// Ordering matters: Negative sorts before Positive, so when a
// learner collects its distinct classes and sorts them, class
// index 0 is always `negative` and index 1 is `positive`
// (alphabetical, the same order the words themselves sort in).
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sentiment of a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Negative,
    Positive,
}

impl Label {
    /// The lowercase word used in reports and files
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Negative => "negative",
            Label::Positive => "positive",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so width specifiers like {:<8} line up in reports
        f.pad(self.as_str())
    }
}

impl FromStr for Label {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "negative" => Ok(Label::Negative),
            "positive" => Ok(Label::Positive),
            other      => anyhow::bail!("Unknown label '{other}' (expected 'positive' or 'negative')"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_sorts_first() {
        let mut labels = vec![Label::Positive, Label::Negative];
        labels.sort();
        assert_eq!(labels, vec![Label::Negative, Label::Positive]);
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(Label::Positive.to_string(), "positive");
        assert_eq!("Negative".parse::<Label>().unwrap(), Label::Negative);
        assert!("neutral".parse::<Label>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_words() {
        let json = serde_json::to_string(&Label::Negative).unwrap();
        assert_eq!(json, "\"negative\"");
        let back: Label = serde_json::from_str("\"positive\"").unwrap();
        assert_eq!(back, Label::Positive);
    }
}
