// ============================================================
// Layer 7 — Visualisation
// ============================================================
// Text renderings of a fitted model. Pure functions returning
// strings; the CLI decides where they are printed.

/// The first levels of the fitted tree
pub mod tree_plot;

/// Horizontal bar chart of the top feature importances
pub mod importance_chart;
