// ============================================================
// Layer 7 — Tree Plot
// ============================================================
// Draws the top levels of a fitted tree as text.
//
// Each node is one rounded "( … )" box showing:
//   - the split rule, or "leaf"
//   - Gini impurity
//   - share of the root's samples (proportional)
//   - weighted class proportions [No, Yes]
//   - the predicted class
// followed by a fill bar: the glyph marks the class
// (█ = Yes, ▒ = No) and its length the node's purity.
//
// Children deeper than the requested depth collapse to (...).

use crate::domain::dataset::CLASS_NAMES;
use crate::ml::tree::{DecisionTreeClassifier, TreeNode};

const FILL_WIDTH: usize = 10;

struct TreePlotter<'a> {
    feature_names: &'a [String],
    root_samples:  f64,
    max_depth:     usize,
}

impl TreePlotter<'_> {
    fn feature_name(&self, idx: usize) -> String {
        self.feature_names
            .get(idx)
            .cloned()
            .unwrap_or_else(|| format!("x[{idx}]"))
    }

    fn node_label(&self, node: &TreeNode) -> String {
        let rule = match &node.split {
            Some(s) => format!("{} <= {:.2}", self.feature_name(s.feature), s.threshold),
            None    => "leaf".to_string(),
        };
        let [p_no, p_yes] = node.proportions();
        let share = 100.0 * node.n_samples as f64 / self.root_samples;

        format!(
            "({rule} | gini = {:.3} | samples = {share:.1}% | value = [{p_no:.2}, {p_yes:.2}] | class = {}) {}",
            node.impurity,
            CLASS_NAMES[usize::from(node.class())],
            fill_bar(node),
        )
    }

    fn render_children(&self, node: &TreeNode, prefix: &str, depth: usize, out: &mut String) {
        let Some(split) = &node.split else {
            return;
        };

        let branches = [("True ", &split.left, false), ("False", &split.right, true)];
        for (edge, child, last) in branches {
            let connector = if last { "└── " } else { "├── " };

            if depth + 1 > self.max_depth {
                out.push_str(&format!("{prefix}{connector}{edge} (...)\n"));
                continue;
            }

            out.push_str(&format!("{prefix}{connector}{edge} {}\n", self.node_label(child)));
            let next = format!("{prefix}{}", if last { "    " } else { "│   " });
            self.render_children(child, &next, depth + 1, out);
        }
    }
}

/// Class glyph repeated in proportion to purity, padded with dots
fn fill_bar(node: &TreeNode) -> String {
    let [p_no, p_yes] = node.proportions();
    let purity = (p_no.max(p_yes) - 0.5).max(0.0) * 2.0;
    let filled = ((purity * FILL_WIDTH as f64).round() as usize).min(FILL_WIDTH);
    let glyph  = if node.class() == 1 { '█' } else { '▒' };

    let mut bar: String = std::iter::repeat(glyph).take(filled).collect();
    bar.extend(std::iter::repeat('·').take(FILL_WIDTH - filled));
    bar
}

/// Render the root and `max_depth` levels below it.
pub fn render_tree(model: &DecisionTreeClassifier, max_depth: usize) -> String {
    let Some(root) = model.root() else {
        return "(empty tree)\n".to_string();
    };

    let plotter = TreePlotter {
        feature_names: model.feature_names(),
        root_samples:  root.n_samples.max(1) as f64,
        max_depth,
    };

    let mut out = plotter.node_label(root);
    out.push('\n');
    plotter.render_children(root, "", 0, &mut out);
    out
}
