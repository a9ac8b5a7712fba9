// ============================================================
// Layer 3 — LabeledExample Domain Type
// ============================================================
// One training sentence together with its sentiment.
//
// The training data is stored as two parallel sequences
// (texts and labels). A LabeledExample is what you get by
// reading both sequences at the same index:
//
//   texts[3]  = "he is bad"
//   labels[3] = negative
//   → LabeledExample { text: "he is bad", label: negative }
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

use crate::domain::label::Label;

/// A sentence and the label it was trained with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    /// The raw sentence, exactly as written
    pub text: String,

    /// The sentiment assigned to the sentence
    pub label: Label,
}

impl LabeledExample {
    /// Create a new LabeledExample.
    /// Accepts &str or String for the text.
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}
