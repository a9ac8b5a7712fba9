// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust types that define what the system talks about:
// sentiment labels, labelled sentences, and the traits that
// every classifier and corpus source implements.
//
// Rules for this layer:
//   - NO file I/O
//   - NO tree learning or vectorisation code
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// The raw positive / negative / test sentence lists
pub mod corpus;

// The two sentiment categories
pub mod label;

// A sentence paired with its label
pub mod labeled_example;

// Core abstractions (traits) that other layers implement
pub mod traits;
