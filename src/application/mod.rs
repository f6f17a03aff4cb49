// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each.
//
// Rules for this layer:
//   - No model math here
//   - No printing here (that's Layer 1)
//   - Only workflow coordination: which stage runs, in what
//     order, and when the run halts

// The full load → preprocess → train → evaluate → render run
pub mod pipeline_use_case;

// Load-only column summary
pub mod inspect_use_case;
