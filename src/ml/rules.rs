// ============================================================
// Layer 5 — Rule-Based Classifier
// ============================================================
// The hand-written baseline the decision tree is compared with.
//
//   1. text contains "hate" → negative
//   2. text contains "bad"  → negative
//   3. otherwise            → positive
//
// Plain substring containment on the whole sentence: case
// sensitive, no tokenisation, no word boundaries. That means
// "whatever" counts as containing "hate" and "badge" as
// containing "bad"; the rule is kept exactly as written.
//
// Reference: Rust Book §8 (Strings), §13 (Iterators)

use crate::domain::{label::Label, traits::TextClassifier};

/// Keywords checked, in order, before falling back to `positive`.
pub const NEGATIVE_KEYWORDS: [&str; 2] = ["hate", "bad"];

/// Keyword-matching sentiment classifier. Stateless.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedClassifier;

impl RuleBasedClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl TextClassifier for RuleBasedClassifier {
    fn classify(&self, text: &str) -> Label {
        // First match wins
        if NEGATIVE_KEYWORDS.iter().any(|kw| text.contains(kw)) {
            Label::Negative
        } else {
            Label::Positive
        }
    }
}
