// ============================================================
// Layer 5 — Evaluator
// ============================================================
// Scores a fitted classifier on the test partition:
//
//   - accuracy
//   - per-class precision / recall / F1 / support, plus macro
//     and support-weighted averages (a classification report)
//   - 2×2 confusion matrix, rows = actual, columns = predicted
//   - feature importances ranked descending
//
// Any ratio with a zero denominator is reported as 0.

use serde::{Deserialize, Serialize};

use crate::domain::dataset::{Dataset, CLASS_NAMES};
use crate::domain::traits::Classifier;

/// One row of the classification report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub label:     String,
    pub precision: f64,
    pub recall:    f64,
    pub f1:        f64,
    pub support:   usize,
}

/// Confusion matrix for the two classes: `counts[actual][predicted]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub counts: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    pub fn from_predictions(actual: &[u8], predicted: &[u8]) -> Self {
        let mut counts = [[0usize; 2]; 2];
        for (&a, &p) in actual.iter().zip(predicted) {
            counts[usize::from(a)][usize::from(p)] += 1;
        }
        Self { counts }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Correct predictions (the diagonal)
    pub fn correct(&self) -> usize {
        self.counts[0][0] + self.counts[1][1]
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.correct(), self.total())
    }

    /// Metrics of `class` treated as the positive class
    pub fn class_metrics(&self, class: usize) -> ClassMetrics {
        let other = 1 - class;
        let tp  = self.counts[class][class];
        let fp  = self.counts[other][class];
        let fn_ = self.counts[class][other];

        let precision = ratio(tp, tp + fp);
        let recall    = ratio(tp, tp + fn_);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        ClassMetrics {
            label: CLASS_NAMES[class].to_string(),
            precision,
            recall,
            f1,
            support: tp + fn_,
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// A feature and its normalised importance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature:    String,
    pub importance: f64,
}

/// Everything the evaluator reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub accuracy:     f64,
    pub test_samples: usize,
    /// One entry per class, "No" then "Yes"
    pub classes:      Vec<ClassMetrics>,
    pub macro_avg:    ClassMetrics,
    pub weighted_avg: ClassMetrics,
    pub confusion:    ConfusionMatrix,
    /// Most important features first, at most `top_n`
    pub top_features: Vec<FeatureImportance>,
}

/// Pair names with importances and sort descending (stable for ties).
pub fn rank_importances(names: &[String], importances: &[f64]) -> Vec<FeatureImportance> {
    let mut ranked: Vec<FeatureImportance> = names
        .iter()
        .zip(importances)
        .map(|(name, &importance)| FeatureImportance { feature: name.clone(), importance })
        .collect();
    ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    ranked
}

fn average(label: &str, classes: &[ClassMetrics], weighted: bool) -> ClassMetrics {
    let support: usize = classes.iter().map(|c| c.support).sum();
    let weight = |c: &ClassMetrics| {
        if weighted {
            ratio(c.support, support)
        } else {
            1.0 / classes.len() as f64
        }
    };

    ClassMetrics {
        label:     label.to_string(),
        precision: classes.iter().map(|c| weight(c) * c.precision).sum(),
        recall:    classes.iter().map(|c| weight(c) * c.recall).sum(),
        f1:        classes.iter().map(|c| weight(c) * c.f1).sum(),
        support,
    }
}

/// Score `model` on `test` and rank its feature importances.
pub fn evaluate<C: Classifier>(model: &C, test: &Dataset, top_n: usize) -> EvaluationReport {
    let predictions = model.predict(&test.features);
    let confusion   = ConfusionMatrix::from_predictions(&test.labels, &predictions);

    let classes: Vec<ClassMetrics> = (0..2).map(|c| confusion.class_metrics(c)).collect();
    let macro_avg    = average("macro avg", &classes, false);
    let weighted_avg = average("weighted avg", &classes, true);

    let mut top_features = rank_importances(&test.feature_names, model.feature_importances());
    top_features.truncate(top_n);

    let report = EvaluationReport {
        accuracy: confusion.accuracy(),
        test_samples: test.n_samples(),
        classes,
        macro_avg,
        weighted_avg,
        confusion,
        top_features,
    };

    tracing::info!(
        "Test accuracy {:.4} on {} rows",
        report.accuracy,
        report.test_samples
    );
    report
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// Predicts 1 when feature 0 exceeds `cut`
    struct Stump {
        cut:         f64,
        importances: Vec<f64>,
    }

    impl Classifier for Stump {
        fn predict_one(&self, row: &[f64]) -> u8 {
            u8::from(row[0] > self.cut)
        }
        fn feature_importances(&self) -> &[f64] {
            &self.importances
        }
    }

    #[test]
    fn test_confusion_matrix_layout() {
        let cm = ConfusionMatrix::from_predictions(&[0, 0, 1, 1, 1], &[0, 1, 1, 1, 0]);
        assert_eq!(cm.counts, [[1, 1], [1, 2]]);
        assert_eq!(cm.total(), 5);
        assert!((cm.accuracy() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_class_metrics() {
        let cm  = ConfusionMatrix { counts: [[50, 10], [5, 35]] };
        let yes = cm.class_metrics(1);
        assert_eq!(yes.label, "Yes");
        assert!((yes.precision - 35.0 / 45.0).abs() < 1e-12);
        assert!((yes.recall - 35.0 / 40.0).abs() < 1e-12);
        assert_eq!(yes.support, 40);

        let no = cm.class_metrics(0);
        assert!((no.precision - 50.0 / 55.0).abs() < 1e-12);
        assert_eq!(no.support, 60);
    }

    #[test]
    fn test_zero_denominators_are_zero() {
        let cm = ConfusionMatrix { counts: [[10, 0], [0, 0]] };
        let yes = cm.class_metrics(1);
        assert_eq!(yes.precision, 0.0);
        assert_eq!(yes.recall, 0.0);
        assert_eq!(yes.f1, 0.0);
    }

    #[test]
    fn test_evaluate_report() {
        let test = Dataset::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![vec![0.0, 0.0, 0.0], vec![2.0, 0.0, 0.0], vec![3.0, 0.0, 0.0], vec![0.5, 0.0, 0.0]],
            vec![0, 1, 1, 1],
        );
        let model = Stump { cut: 1.0, importances: vec![0.2, 0.7, 0.1] };

        let report = evaluate(&model, &test, 2);
        assert!((report.accuracy - 0.75).abs() < 1e-12);
        assert_eq!(report.confusion.counts, [[1, 0], [1, 2]]);
        assert_eq!(report.weighted_avg.support, 4);
        assert_eq!(
            report.top_features.iter().map(|f| f.feature.as_str()).collect::<Vec<_>>(),
            vec!["b", "a"]
        );
    }

    #[test]
    fn test_empty_test_set() {
        let model  = Stump { cut: 0.0, importances: vec![] };
        let report = evaluate(&model, &Dataset::default(), 10);
        assert_eq!(report.accuracy, 0.0);
        assert_eq!(report.test_samples, 0);
    }
}
