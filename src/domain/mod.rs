// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits describing the core concepts:
// the raw table read from disk, the numeric dataset fed to
// the model, and the seams other layers implement.
//
// Rules for this layer:
//   - NO file I/O
//   - NO model code
//   - Only structs, enums, and traits

// The untyped table parsed from the CSV
pub mod table;

// The numeric feature matrix + binary labels
pub mod dataset;

// Core abstractions (traits) that other layers implement
pub mod traits;
