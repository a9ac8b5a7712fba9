// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw sentence lists and the numeric
// vectors a learner consumes:
//
//   CorpusSource       → positive / negative / test sentences
//       │
//       ▼
//   LabeledCorpus      → one text list + a parallel label list
//       │
//       ▼
//   CountVectorizer    → vocabulary, then word-count vectors
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Built-in and JSON-file sentence sources
pub mod corpus;

/// Concatenates labelled lists into index-aligned texts and labels
pub mod assembler;

/// Turns sentences into word-count vectors
pub mod vectorizer;
