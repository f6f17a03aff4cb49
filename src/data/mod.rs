// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the zip archive on disk to the numeric
// train/test partitions:
//
//   archive.zip
//       │
//       ▼
//   ArchiveLoader   → extracts the CSV, sniffs the delimiter
//       │
//       ▼
//   target          → picks + binarises the target column
//       │
//       ▼
//   encoder         → label-encodes categorical columns
//       │
//       ▼
//   imputer         → fills missing cells with column modes
//       │
//       ▼
//   splitter        → stratified 70/30 split
//
// Preprocessor wires target → encoder → imputer together.
//
// Each module owns one step and is a plain function over
// owned or borrowed data, so every step is unit-tested on a
// hand-built table without touching the filesystem. Only the
// loader does I/O; everything after it works in memory.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            csv crate docs (ReaderBuilder)
//            zip crate docs (ZipArchive, enclosed_name)

/// Extracts and parses the CSV inside a zip archive
pub mod loader;

/// Target column inference and binarisation
pub mod target;

/// Label encoding of categorical columns
pub mod encoder;

/// Mode imputation of missing cells
pub mod imputer;

/// Raw table → numeric dataset
pub mod preprocessor;

/// Stratified train/test split
pub mod splitter;
