// ============================================================
// Layer 4 — Dataset Assembler
// ============================================================
// Turns the two labelled sentence lists into the shape a
// learner wants: one ordered list of texts and a parallel,
// index-aligned list of labels.
//
//   negative = ["we hate you", "they hate us"]
//   positive = ["we love you"]
//
//   texts  = ["we hate you", "they hate us", "we love you"]
//   labels = [negative,      negative,       positive     ]
//
// Negatives always come first, then positives, each list
// keeping its own order. Nothing can fail here: it is pure
// concatenation.
//
// Invariant: texts.len() == labels.len()
//
// Reference: Rust Book §8 (Vectors)
//            Rust Book §13 (Iterators)

use std::iter;

use crate::domain::{label::Label, labeled_example::LabeledExample};

/// The assembled training data: texts and labels, index-aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledCorpus {
    texts:  Vec<String>,
    labels: Vec<Label>,
}

impl LabeledCorpus {
    /// Concatenate `negative` then `positive` and label each sentence
    /// with the list it came from.
    pub fn assemble<S: AsRef<str>>(negative: &[S], positive: &[S]) -> Self {
        let texts: Vec<String> = negative
            .iter()
            .chain(positive.iter())
            .map(|t| t.as_ref().to_string())
            .collect();

        let labels: Vec<Label> = iter::repeat(Label::Negative)
            .take(negative.len())
            .chain(iter::repeat(Label::Positive).take(positive.len()))
            .collect();

        debug_assert_eq!(texts.len(), labels.len());
        Self { texts, labels }
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// All training sentences in order
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// All labels in order; labels()[i] labels texts()[i]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// The sentence and label at `index`, if in range
    pub fn example(&self, index: usize) -> Option<LabeledExample> {
        let text  = self.texts.get(index)?;
        let label = self.labels.get(index)?;
        Some(LabeledExample::new(text.as_str(), *label))
    }

    /// Zip texts and labels back together
    pub fn iter(&self) -> impl Iterator<Item = LabeledExample> + '_ {
        self.texts
            .iter()
            .zip(self.labels.iter())
            .map(|(text, label)| LabeledExample::new(text.as_str(), *label))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::corpus::{NEGATIVE_TEXTS, POSITIVE_TEXTS};

    #[test]
    fn test_lengths_match() {
        let corpus = LabeledCorpus::assemble(&NEGATIVE_TEXTS, &POSITIVE_TEXTS);
        assert_eq!(corpus.len(), NEGATIVE_TEXTS.len() + POSITIVE_TEXTS.len());
        assert_eq!(corpus.texts().len(), corpus.labels().len());
    }

    #[test]
    fn test_negatives_come_first() {
        let corpus = LabeledCorpus::assemble(&NEGATIVE_TEXTS, &POSITIVE_TEXTS);
        let n      = NEGATIVE_TEXTS.len();

        assert!(corpus.labels()[..n].iter().all(|&l| l == Label::Negative));
        assert!(corpus.labels()[n..].iter().all(|&l| l == Label::Positive));
        assert_eq!(corpus.texts()[0],  "we hate you");
        assert_eq!(corpus.texts()[n],  "we love you");
        assert_eq!(corpus.texts()[9],  "they love mary");
    }

    #[test]
    fn test_uneven_lists() {
        let corpus = LabeledCorpus::assemble(&["a", "b", "c"], &["d"]);
        assert_eq!(corpus.texts(), &["a", "b", "c", "d"]);
        assert_eq!(
            corpus.labels(),
            &[Label::Negative, Label::Negative, Label::Negative, Label::Positive]
        );
    }

    #[test]
    fn test_empty_inputs() {
        let empty: [&str; 0] = [];
        let corpus = LabeledCorpus::assemble(&empty, &empty);
        assert!(corpus.is_empty());
        assert!(corpus.labels().is_empty());

        let only_positive = LabeledCorpus::assemble(&empty, &["x"]);
        assert_eq!(only_positive.labels(), &[Label::Positive]);
    }

    #[test]
    fn test_example_at_index() {
        let corpus = LabeledCorpus::assemble(&NEGATIVE_TEXTS, &POSITIVE_TEXTS);
        assert_eq!(
            corpus.example(3),
            Some(LabeledExample::new("he is bad", Label::Negative))
        );
        assert_eq!(corpus.example(10), None);
    }

    #[test]
    fn test_iter_zips_in_order() {
        let corpus   = LabeledCorpus::assemble(&["bad day"], &["good day"]);
        let examples: Vec<LabeledExample> = corpus.iter().collect();
        assert_eq!(
            examples,
            vec![
                LabeledExample::new("bad day",  Label::Negative),
                LabeledExample::new("good day", Label::Positive),
            ]
        );
    }
}
