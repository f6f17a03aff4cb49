// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong in any business
// layer:
//
//   scratch.rs — The extraction directory
//                Created at the start of a run, removed
//                once the run finishes normally.
//
//   report.rs  — Text reports
//                Classification report, confusion matrix
//                and the inspection column table.
//
// Why is this a separate layer?
//   Both use cases need the scratch directory, and both CLI
//   commands need report text. Keeping them here stops the
//   application layer from printing and the CLI from
//   formatting numbers itself.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Scratch directory lifecycle
pub mod scratch;

/// Plain-text report formatting
pub mod report;
