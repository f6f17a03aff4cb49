// ============================================================
// Layer 6 — Report Formatting
// ============================================================
// Plain-text renderings of the evaluation report and the
// inspection summary. The CLI prints these verbatim.
//
// The classification report follows the familiar layout:
//
//                 precision    recall  f1-score   support
//
//            No       0.95      0.87      0.91       ...
//           Yes       0.45      0.70      0.55       ...
//
//      accuracy                           0.85       ...
//     macro avg       0.70      0.79      0.73       ...
//  weighted avg       0.89      0.85      0.87       ...

use std::fmt::{self, Display, Formatter};

use crate::application::inspect_use_case::{ColumnKind, InspectionSummary};
use crate::domain::dataset::CLASS_NAMES;
use crate::ml::evaluator::{ClassMetrics, EvaluationReport};

const LABEL_WIDTH: usize = 12;

struct EvaluationView<'a>(&'a EvaluationReport);

fn write_metrics_row(f: &mut Formatter<'_>, m: &ClassMetrics) -> fmt::Result {
    writeln!(
        f,
        "{:>lw$} {:>10.2} {:>9.2} {:>9.2} {:>9}",
        m.label,
        m.precision,
        m.recall,
        m.f1,
        m.support,
        lw = LABEL_WIDTH,
    )
}

impl Display for EvaluationView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let r = self.0;

        writeln!(f, "Accuracy: {:.4} ({} test samples)", r.accuracy, r.test_samples)?;
        writeln!(f)?;

        // ── Classification report ──
        writeln!(f, "Classification report")?;
        writeln!(
            f,
            "{:>lw$} {:>10} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support",
            lw = LABEL_WIDTH,
        )?;
        writeln!(f)?;
        for m in &r.classes {
            write_metrics_row(f, m)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>lw$} {:>10} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", r.accuracy, r.test_samples,
            lw = LABEL_WIDTH,
        )?;
        write_metrics_row(f, &r.macro_avg)?;
        write_metrics_row(f, &r.weighted_avg)?;
        writeln!(f)?;

        // ── Confusion matrix (rows = actual) ──
        writeln!(f, "Confusion matrix (rows = actual, columns = predicted)")?;
        writeln!(
            f,
            "{:>lw$} {:>8} {:>8}",
            "", CLASS_NAMES[0], CLASS_NAMES[1],
            lw = LABEL_WIDTH,
        )?;
        for (name, row) in CLASS_NAMES.iter().zip(r.confusion.counts.iter()) {
            writeln!(f, "{:>lw$} {:>8} {:>8}", name, row[0], row[1], lw = LABEL_WIDTH)?;
        }

        if !r.top_features.is_empty() {
            writeln!(f)?;
            writeln!(f, "Top features")?;
            for (rank, fi) in r.top_features.iter().enumerate() {
                writeln!(f, "{:>3}. {:<20} {:.4}", rank + 1, fi.feature, fi.importance)?;
            }
        }
        Ok(())
    }
}

/// Accuracy, classification report, confusion matrix and top features
pub fn format_evaluation(report: &EvaluationReport) -> String {
    EvaluationView(report).to_string()
}

struct InspectionView<'a>(&'a InspectionSummary);

fn kind_label(kind: ColumnKind) -> &'static str {
    match kind {
        ColumnKind::Target       => "target",
        ColumnKind::Numeric      => "numeric",
        ColumnKind::Categorical  => "categorical",
        ColumnKind::UnlistedText => "text (unlisted)",
    }
}

impl Display for InspectionView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = self.0;

        writeln!(f, "Rows: {}  Columns: {}", s.rows, s.columns.len())?;
        match &s.target {
            Some(t) => writeln!(f, "Target: '{}' (chosen by {:?})", t.name, t.strategy)?,
            None    => writeln!(f, "Target: none")?,
        }
        writeln!(f)?;

        let name_width = s
            .columns
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("column".len());

        writeln!(f, "{:<nw$}  {:<15} {:>8} {:>6}", "column", "kind", "distinct", "nulls", nw = name_width)?;
        for c in &s.columns {
            writeln!(
                f,
                "{:<nw$}  {:<15} {:>8} {:>6}",
                c.name,
                kind_label(c.kind),
                c.distinct,
                c.nulls,
                nw = name_width,
            )?;
        }
        Ok(())
    }
}

/// Column table of an inspected archive
pub fn format_inspection(summary: &InspectionSummary) -> String {
    InspectionView(summary).to_string()
}
