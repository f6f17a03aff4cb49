// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// The decision tree and everything that trains or scores it.
//
//   tree.rs      — CART decision tree on weighted Gini
//                  impurity with depth / split / leaf limits,
//                  balanced class weights and seeded
//                  feature permutation
//
//   trainer.rs   — fits the tree on the training partition,
//                  returns no model for an empty partition
//
//   evaluator.rs — accuracy, classification report,
//                  confusion matrix, ranked importances
//
// TreeNode fields are public so the tree plot in Layer 7 can
// walk a fitted tree directly. The evaluator depends only on
// the Classifier trait, never on the tree type.
//
// Reference: Rust Book §8 (Common Collections)
//            Rust Book §15 (Smart Pointers: Box<T>)

/// Decision tree classifier
pub mod tree;

/// Training entry point
pub mod trainer;

/// Metrics on the test partition
pub mod evaluator;
