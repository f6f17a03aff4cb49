// ============================================================
// Layer 5 — Trainer
// ============================================================
// Fits the decision tree on the training partition.
// An empty partition yields no model; the caller then skips
// evaluation and visualisation.

use anyhow::Result;

use crate::domain::dataset::Dataset;
use crate::domain::traits::Classifier;
use crate::ml::tree::{DecisionTreeClassifier, TreeConfig};

/// Train a tree on `train`. Returns `Ok(None)` when there is nothing to train on.
pub fn train_model(train: &Dataset, config: &TreeConfig) -> Result<Option<DecisionTreeClassifier>> {
    if train.is_empty() {
        tracing::warn!("Training partition is empty; no model will be trained");
        return Ok(None);
    }

    tracing::info!(
        "Training decision tree on {} rows (max_depth={}, min_samples_split={}, min_samples_leaf={}, balanced class weights)",
        train.n_samples(),
        config.max_depth,
        config.min_samples_split,
        config.min_samples_leaf,
    );

    let mut model = DecisionTreeClassifier::new(config.clone());
    model.fit(train)?;

    let predictions = model.predict(&train.features);
    let correct = predictions
        .iter()
        .zip(&train.labels)
        .filter(|(p, l)| p == l)
        .count();

    tracing::info!(
        "Training complete: depth {}, {} leaves, train accuracy {:.4}",
        model.depth(),
        model.n_leaves(),
        correct as f64 / train.n_samples() as f64,
    );

    Ok(Some(model))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_partition_gives_no_model() {
        let model = train_model(&Dataset::default(), &TreeConfig::default()).unwrap();
        assert!(model.is_none());
    }

    #[test]
    fn test_trains_on_data() {
        let data = Dataset::new(
            vec!["x".into()],
            (0..40).map(|i| vec![i as f64]).collect(),
            (0..40).map(|i| u8::from(i >= 20)).collect(),
        );
        let model = train_model(&data, &TreeConfig::default()).unwrap().unwrap();
        assert_eq!(model.predict_one(&[35.0]), 1);
        assert_eq!(model.predict_one(&[3.0]), 0);
    }
}
