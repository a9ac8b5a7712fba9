// ============================================================
// Layer 4 — Count Vectorizer
// ============================================================
// Converts sentences into fixed-length vectors of word counts.
//
// Step 1 — fit: find every unique word in the training corpus
// and give it a number. Words are numbered in alphabetical
// order, so the vocabulary for
//
//   ["nice pizza is nice", "what is pizza"]
//
// is { "is": 0, "nice": 1, "pizza": 2, "what": 3 }.
//
// Step 2 — transform: for each sentence, count how many times
// each vocabulary word appears:
//
//   "nice pizza is nice" → [1, 2, 1, 0]
//   "what is pizza"      → [1, 0, 1, 1]
//
// Words never seen during fit are ignored.
//
// Tokenisation rules:
//   - the whole sentence is lowercased first
//   - a token is a maximal run of word characters
//     (letters, digits, underscore)
//   - tokens shorter than 2 characters are dropped ("a", "I")
//
// Reference: Rust Book §8 (Hash Maps), §13 (Iterators)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A fitted word-count vectorizer.
///
/// There is no "unfitted" state: the only way to get one is
/// [`CountVectorizer::fit`], so `transform` can never be called
/// before a vocabulary exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountVectorizer {
    /// term → column index, indices assigned in sorted term order
    vocabulary: BTreeMap<String, usize>,
}

impl CountVectorizer {
    /// Learn the vocabulary of `corpus`.
    ///
    /// Fails if the corpus contains no usable tokens at all.
    pub fn fit<S: AsRef<str>>(corpus: &[S]) -> Result<Self> {
        let mut vocabulary: BTreeMap<String, usize> = corpus
            .iter()
            .flat_map(|doc| tokenize(doc.as_ref()))
            .map(|term| (term, 0))
            .collect();

        if vocabulary.is_empty() {
            anyhow::bail!(
                "Empty vocabulary: the {} training documents contain no words of 2+ characters",
                corpus.len()
            );
        }

        // BTreeMap iterates in key order, so this numbers the
        // terms alphabetically.
        for (index, slot) in vocabulary.values_mut().enumerate() {
            *slot = index;
        }

        tracing::debug!(
            "Vectorizer fitted on {} documents: {} terms",
            corpus.len(),
            vocabulary.len()
        );
        Ok(Self { vocabulary })
    }

    /// Fit on `corpus` and return its count vectors in one go.
    pub fn fit_transform<S: AsRef<str>>(corpus: &[S]) -> Result<(Self, Vec<Vec<f64>>)> {
        let vectorizer = Self::fit(corpus)?;
        let vectors    = vectorizer.transform(corpus);
        Ok((vectorizer, vectors))
    }

    /// Count vocabulary terms in each text.
    /// Every returned vector has exactly `n_features()` entries.
    pub fn transform<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Vec<f64>> {
        texts.iter().map(|t| self.transform_one(t.as_ref())).collect()
    }

    /// Count vocabulary terms in a single text.
    pub fn transform_one(&self, text: &str) -> Vec<f64> {
        let mut counts = vec![0.0; self.vocabulary.len()];
        for term in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                counts[index] += 1.0;
            }
        }
        counts
    }

    /// term → column index
    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    /// Terms in column order, so `feature_names()[i]` names column i.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = vec![String::new(); self.vocabulary.len()];
        for (term, &index) in &self.vocabulary {
            names[index] = term.clone();
        }
        names
    }

    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Split a sentence into lowercase tokens of at least two word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut tokens  = Vec::new();
    let mut current = String::new();

    // A trailing non-word character flushes the last token.
    for c in lowered.chars().chain(std::iter::once(' ')) {
        if c.is_alphanumeric() || c == '_' {
            current.push(c);
        } else if !current.is_empty() {
            if current.chars().count() >= 2 {
                tokens.push(current.clone());
            }
            current.clear();
        }
    }
    tokens
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::corpus::{NEGATIVE_TEXTS, POSITIVE_TEXTS};

    #[test]
    fn test_pizza_example() {
        let corpus = ["nice pizza is nice", "what is pizza"];
        let (vectorizer, vectors) = CountVectorizer::fit_transform(&corpus).unwrap();

        assert_eq!(vectorizer.feature_names(), vec!["is", "nice", "pizza", "what"]);
        assert_eq!(vectors[0], vec![1.0, 2.0, 1.0, 0.0]);
        assert_eq!(vectors[1], vec![1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_tutorial_vocabulary_is_alphabetical() {
        let training: Vec<&str> = NEGATIVE_TEXTS.iter().chain(POSITIVE_TEXTS.iter()).copied().collect();
        let vectorizer = CountVectorizer::fit(&training).unwrap();

        assert_eq!(
            vectorizer.feature_names(),
            vec!["are", "bad", "good", "hate", "he", "is", "love", "mary", "they", "us", "we", "you"]
        );
        assert_eq!(vectorizer.vocabulary()["hate"], 3);
        assert_eq!(
            vectorizer.transform_one("we hate you"),
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0]
        );
    }

    #[test]
    fn test_unknown_words_are_ignored() {
        let vectorizer = CountVectorizer::fit(&["we love you"]).unwrap();
        let vector     = vectorizer.transform_one("people love cats");
        assert_eq!(vector.len(), 3);
        assert_eq!(vector.iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn test_tokenizer_lowercases_and_drops_short_tokens() {
        assert_eq!(tokenize("I LOVE a Good_day, ok?"), vec!["love", "good_day", "ok"]);
        assert!(tokenize("a b c !").is_empty());
    }

    #[test]
    fn test_empty_vocabulary_is_an_error() {
        assert!(CountVectorizer::fit(&["a b", "!"]).is_err());
        let none: [&str; 0] = [];
        assert!(CountVectorizer::fit(&none).is_err());
    }
}
