// ============================================================
// Layer 7 — Feature Importance Chart
// ============================================================
// Horizontal bar chart of ranked importances, most important
// at the top. Bars are scaled so the largest fills BAR_WIDTH.

use crate::ml::evaluator::FeatureImportance;

const BAR_WIDTH: usize = 40;

pub fn render_importances(ranked: &[FeatureImportance]) -> String {
    if ranked.is_empty() {
        return "(no features)\n".to_string();
    }

    let label_width = ranked.iter().map(|f| f.feature.chars().count()).max().unwrap_or(0);
    let max = ranked.iter().map(|f| f.importance).fold(0.0_f64, f64::max);

    let mut out = String::new();
    for f in ranked {
        let len = if max > 0.0 {
            ((f.importance / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let bar: String = std::iter::repeat('█').take(len.min(BAR_WIDTH)).collect();
        out.push_str(&format!(
            "{:>width$} │{:<bar_width$} {:.4}\n",
            f.feature,
            bar,
            f.importance,
            width = label_width,
            bar_width = BAR_WIDTH,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fi(name: &str, importance: f64) -> FeatureImportance {
        FeatureImportance { feature: name.into(), importance }
    }

    #[test]
    fn test_most_important_on_top_with_full_bar() {
        let chart = render_importances(&[fi("duration", 0.6), fi("age", 0.3), fi("pdays", 0.0)]);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].trim_start().starts_with("duration"));
        assert_eq!(lines[0].matches('█').count(), 40);
        assert_eq!(lines[1].matches('█').count(), 20);
        assert_eq!(lines[2].matches('█').count(), 0);
        assert!(lines[2].ends_with("0.0000"));
    }

    #[test]
    fn test_empty_ranking() {
        assert_eq!(render_importances(&[]), "(no features)\n");
    }
}
