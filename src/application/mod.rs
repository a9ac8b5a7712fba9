// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each:
//
//   train_use_case   — the full tutorial run: assemble the
//                      corpus, fit vectorizer + tree, predict
//                      the test sentences, draw the tree, run
//                      the keyword rules, save a checkpoint
//
//   predict_use_case — load a checkpoint and classify new
//                      sentences with both classifiers
//
// Rules for this layer:
//   - No tree maths here (that's Layer 5)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The training workflow
pub mod train_use_case;

// The prediction workflow
pub mod predict_use_case;
