// ============================================================
// Layer 4 — Corpus Sources
// ============================================================
// Supplies the three sentence lists the pipeline works on:
//
//   positive → training sentences labelled `positive`
//   negative → training sentences labelled `negative`
//   test     → unseen sentences to predict
//
// Two sources implement the CorpusSource trait from Layer 3:
//
//   BuiltinCorpus  — the tutorial sentences, compiled into the binary
//   JsonCorpusFile — a JSON file with the same three lists:
//
//     {
//       "positive": ["we love you", ...],
//       "negative": ["we hate you", ...],
//       "test":     ["they are good", ...]      ← optional
//     }
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json crate documentation

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::{corpus::Corpus, traits::CorpusSource};

pub const POSITIVE_TEXTS: [&str; 5] = [
    "we love you",
    "they love us",
    "you are good",
    "he is good",
    "they love mary",
];

pub const NEGATIVE_TEXTS: [&str; 5] = [
    "we hate you",
    "they hate us",
    "you are bad",
    "he is bad",
    "we hate mary",
];

pub const TEST_TEXTS: [&str; 6] = [
    "people love cats and dogs equally",
    "they are good",
    "why do you hate mary",
    "they are almost always good",
    "we are very bad",
    "they dislike sports",
];

// ─── BuiltinCorpus ────────────────────────────────────────────────────────────
/// The tutorial's hand-written sentences.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinCorpus;

impl CorpusSource for BuiltinCorpus {
    fn load(&self) -> Result<Corpus> {
        Ok(Corpus {
            positive: owned(&POSITIVE_TEXTS),
            negative: owned(&NEGATIVE_TEXTS),
            test:     owned(&TEST_TEXTS),
        })
    }
}

fn owned(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

// ─── JsonCorpusFile ───────────────────────────────────────────────────────────
/// Sentences read from a JSON file on disk.
pub struct JsonCorpusFile {
    path: PathBuf,
}

impl JsonCorpusFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CorpusSource for JsonCorpusFile {
    fn load(&self) -> Result<Corpus> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read corpus file '{}'", self.path.display()))?;

        let corpus: Corpus = serde_json::from_str(&json)
            .with_context(|| format!("Invalid corpus JSON in '{}'", self.path.display()))?;

        // Only warn here; training rejects a corpus with nothing
        // to learn from.
        if corpus.positive.is_empty() || corpus.negative.is_empty() {
            tracing::warn!(
                "Corpus '{}' has {} positive and {} negative sentences; one class is missing",
                self.path.display(),
                corpus.positive.len(),
                corpus.negative.len()
            );
        }

        tracing::debug!(
            "Loaded corpus from '{}': {} positive, {} negative, {} test",
            self.path.display(),
            corpus.positive.len(),
            corpus.negative.len(),
            corpus.test.len()
        );
        Ok(corpus)
    }
}
