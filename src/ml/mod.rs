// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// Everything that learns or classifies lives here:
//
//   model.rs      — the decision tree structure and prediction
//                   (nodes, splits, impurity criteria, config)
//
//   trainer.rs    — CART induction: grows a tree from count
//                   vectors and labels
//
//   inferencer.rs — TrainedModel: vocabulary + tree as one
//                   unit that classifies raw sentences
//
//   rules.rs      — the hand-written keyword baseline
//
// Reference: Breiman et al. (1984) Classification and Regression Trees

/// Decision tree structure and prediction
pub mod model;

/// CART training
pub mod trainer;

/// Vectorizer + tree bundle that classifies sentences
pub mod inferencer;

/// Keyword-matching baseline classifier
pub mod rules;
