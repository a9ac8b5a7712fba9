// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Two seams let the application layer stay ignorant of how
// classification and data loading are actually done:
//
//   - TextClassifier: anything that maps a sentence to a Label
//       • RuleBasedClassifier → keyword matching
//       • TrainedModel        → count vectorizer + decision tree
//
//   - CorpusSource: anything that can hand over the sentence lists
//       • BuiltinCorpus  → the tutorial sentences compiled in
//       • JsonCorpusFile → sentences read from a JSON file
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::{corpus::Corpus, label::Label};

// ─── TextClassifier ───────────────────────────────────────────────────────────
/// Any component that assigns a sentiment label to a sentence.
pub trait TextClassifier {
    /// Classify one sentence.
    fn classify(&self, text: &str) -> Label;

    /// Classify every sentence in order, producing a parallel list.
    fn classify_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Label> {
        texts.iter().map(|t| self.classify(t.as_ref())).collect()
    }
}

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can supply the positive, negative and test sentences.
pub trait CorpusSource {
    fn load(&self) -> Result<Corpus>;
}
