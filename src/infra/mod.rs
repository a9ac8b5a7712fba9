// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that touch the filesystem:
//
//   checkpoint.rs — saves the trained model (vocabulary + tree)
//                   and its training config as JSON, and loads
//                   them back for `predict`
//
//   metrics.rs    — appends one CSV row per training run
//                   (training accuracy, agreement with rules)
//
//   render.rs     — draws the fitted tree as SVG or Graphviz
//                   DOT, or dumps it as indented text
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Training-run metrics CSV logger
pub mod metrics;

/// Tree drawing (SVG, DOT, text)
pub mod render;
