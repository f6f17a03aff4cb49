// ============================================================
// Layer 4 — Stratified Train/Test Splitter
// ============================================================
// Splits the dataset into a training and a test partition
// while preserving the class ratio in both.
//
// For each class separately:
//   1. collect the row indices of that class
//   2. shuffle them with a seeded ChaCha8 RNG
//   3. the first round(count × test_fraction) go to test,
//      the rest to train
//
// Both partitions are shuffled once more so classes are
// interleaved. The same seed always yields the same split.

use anyhow::{bail, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::dataset::Dataset;

/// Train/test partitions of one dataset
#[derive(Debug, Clone)]
pub struct Split {
    pub train: Dataset,
    pub test:  Dataset,
}

/// Stratified split of `dataset`; `test_fraction` must lie in (0, 1).
///
/// Every class present needs at least two rows, otherwise it
/// cannot appear on both sides and the split is refused.
pub fn stratified_split(dataset: &Dataset, test_fraction: f64, seed: u64) -> Result<Split> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        bail!("test fraction must be between 0 and 1, got {test_fraction}");
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut train_idx = Vec::with_capacity(dataset.n_samples());
    let mut test_idx  = Vec::new();

    for class in 0..=1u8 {
        let mut members: Vec<usize> = dataset
            .labels
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == class)
            .map(|(i, _)| i)
            .collect();

        match members.len() {
            0 => continue,
            1 => bail!(
                "class {class} has a single row; stratified splitting needs at least two per class"
            ),
            _ => {}
        }

        members.shuffle(&mut rng);

        let n_test = ((members.len() as f64) * test_fraction).round() as usize;
        let n_test = n_test.min(members.len());

        test_idx.extend_from_slice(&members[..n_test]);
        train_idx.extend_from_slice(&members[n_test..]);
    }

    train_idx.shuffle(&mut rng);
    test_idx.shuffle(&mut rng);

    tracing::info!(
        "Stratified split: {} train, {} test ({:.0}% held out)",
        train_idx.len(),
        test_idx.len(),
        test_fraction * 100.0,
    );

    Ok(Split {
        train: dataset.subset(&train_idx),
        test:  dataset.subset(&test_idx),
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// `n` rows, the first `n_pos` labelled 1; feature 0 is the row id
    fn dataset(n: usize, n_pos: usize) -> Dataset {
        Dataset::new(
            vec!["id".into()],
            (0..n).map(|i| vec![i as f64]).collect(),
            (0..n).map(|i| u8::from(i < n_pos)).collect(),
        )
    }

    #[test]
    fn test_preserves_80_20_ratio() {
        let data  = dataset(1000, 200);
        let split = stratified_split(&data, 0.3, 42).unwrap();

        assert_eq!(split.train.n_samples(), 700);
        assert_eq!(split.test.n_samples(),  300);
        assert_eq!(split.train.class_counts(), [560, 140]);
        assert_eq!(split.test.class_counts(),  [240, 60]);
    }

    #[test]
    fn test_partitions_are_disjoint_and_cover() {
        let data  = dataset(97, 31);
        let split = stratified_split(&data, 0.3, 7).unwrap();

        let mut ids: Vec<usize> = split
            .train
            .features
            .iter()
            .chain(split.test.features.iter())
            .map(|row| row[0] as usize)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..97).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let data = dataset(200, 50);
        let a = stratified_split(&data, 0.3, 42).unwrap();
        let b = stratified_split(&data, 0.3, 42).unwrap();
        let c = stratified_split(&data, 0.3, 43).unwrap();

        assert_eq!(a.test.features, b.test.features);
        assert_ne!(a.test.features, c.test.features);
    }

    #[test]
    fn test_empty_dataset() {
        let split = stratified_split(&Dataset::default(), 0.3, 42).unwrap();
        assert!(split.train.is_empty());
        assert!(split.test.is_empty());
    }

    #[test]
    fn test_singleton_class_is_rejected() {
        assert!(stratified_split(&dataset(10, 1), 0.3, 42).is_err());
    }

    #[test]
    fn test_invalid_fraction_is_rejected() {
        assert!(stratified_split(&dataset(10, 5), 1.0, 42).is_err());
        assert!(stratified_split(&dataset(10, 5), 0.0, 42).is_err());
    }
}
