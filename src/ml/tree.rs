// ============================================================
// Layer 5 — Decision Tree Classifier
// ============================================================
// Binary CART tree grown on weighted Gini impurity.
//
// Growth rules:
//   - a node becomes a leaf at max_depth, when it holds fewer
//     than min_samples_split rows, or when it is pure
//   - a split must leave at least min_samples_leaf rows on
//     each side
//   - among valid splits the largest weighted impurity
//     decrease wins; features are visited in a seeded random
//     permutation so ties resolve the same way every run
//
// Balanced class weighting gives every row of class c the
// weight n / (n_classes × n_c).
//
// Feature importance is the total weighted impurity decrease
// each feature produced, normalised to sum to 1.

use anyhow::{bail, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::domain::dataset::Dataset;
use crate::domain::traits::Classifier;

/// Impurity (and relative gain) below this counts as zero
const MIN_GAIN: f64 = 1e-12;

/// Decision tree hyperparameters. Class weighting is always balanced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    pub max_depth:         usize,
    pub min_samples_split: usize,
    pub min_samples_leaf:  usize,
    pub seed:              u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth:         5,
            min_samples_split: 10,
            min_samples_leaf:  5,
            seed:              42,
        }
    }
}

/// Internal split of a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSplit {
    pub feature:   usize,
    /// Rows with `value <= threshold` go left
    pub threshold: f64,
    pub left:      Box<TreeNode>,
    pub right:     Box<TreeNode>,
}

/// One node of the fitted tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Weighted class totals of the rows reaching this node
    pub class_weights: [f64; 2],
    /// Number of training rows reaching this node
    pub n_samples:     usize,
    /// Weighted Gini impurity
    pub impurity:      f64,
    /// `None` for leaves
    pub split:         Option<NodeSplit>,
}

impl TreeNode {
    /// Predicted class: heavier weighted class, ties to 0
    pub fn class(&self) -> u8 {
        u8::from(self.class_weights[1] > self.class_weights[0])
    }

    /// Weighted class proportions
    pub fn proportions(&self) -> [f64; 2] {
        let total = self.class_weights[0] + self.class_weights[1];
        if total <= 0.0 {
            return [0.0, 0.0];
        }
        [self.class_weights[0] / total, self.class_weights[1] / total]
    }

    pub fn depth(&self) -> usize {
        match &self.split {
            None    => 0,
            Some(s) => 1 + s.left.depth().max(s.right.depth()),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match &self.split {
            None    => 1,
            Some(s) => s.left.n_leaves() + s.right.n_leaves(),
        }
    }
}

/// Gini impurity of weighted class totals
fn gini(totals: [f64; 2]) -> f64 {
    let sum = totals[0] + totals[1];
    if sum <= 0.0 {
        return 0.0;
    }
    let p0 = totals[0] / sum;
    let p1 = totals[1] / sum;
    1.0 - p0 * p0 - p1 * p1
}

/// Balanced per-row training weights for `labels`
fn sample_weights(labels: &[u8]) -> Vec<f64> {
    let mut counts = [0usize; 2];
    for &l in labels {
        counts[usize::from(l)] += 1;
    }
    let n_classes = counts.iter().filter(|&&c| c > 0).count() as f64;
    let n = labels.len() as f64;
    let class_w = counts.map(|c| if c == 0 { 0.0 } else { n / (n_classes * c as f64) });
    labels.iter().map(|&l| class_w[usize::from(l)]).collect()
}

/// Candidate split found by the sweep
struct BestSplit {
    feature:   usize,
    threshold: f64,
    gain:      f64,
}

/// Decision tree model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    config:              TreeConfig,
    root:                Option<TreeNode>,
    feature_names:       Vec<String>,
    feature_importances: Vec<f64>,
}

impl DecisionTreeClassifier {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            root:                None,
            feature_names:       Vec::new(),
            feature_importances: Vec::new(),
        }
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn depth(&self) -> usize {
        self.root.as_ref().map(TreeNode::depth).unwrap_or(0)
    }

    pub fn n_leaves(&self) -> usize {
        self.root.as_ref().map(TreeNode::n_leaves).unwrap_or(0)
    }

    /// Train the tree on `dataset`.
    pub fn fit(&mut self, dataset: &Dataset) -> Result<()> {
        if dataset.is_empty() {
            bail!("cannot fit a decision tree on an empty dataset");
        }
        if dataset.labels.iter().any(|&l| l > 1) {
            bail!("labels must be 0 or 1");
        }

        self.feature_names       = dataset.feature_names.clone();
        self.feature_importances = vec![0.0; dataset.n_features()];

        let weights = sample_weights(&dataset.labels);
        let indices: Vec<usize> = (0..dataset.n_samples()).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        let root = self.build_tree(dataset, &weights, indices, 0, &mut rng);
        self.root = Some(root);

        // Normalise feature importances
        let sum: f64 = self.feature_importances.iter().sum();
        if sum > 0.0 {
            for imp in &mut self.feature_importances {
                *imp /= sum;
            }
        }

        tracing::debug!(
            "Tree fitted: depth {}, {} leaves",
            self.depth(),
            self.n_leaves()
        );
        Ok(())
    }

    /// Build tree recursively
    fn build_tree(
        &mut self,
        dataset: &Dataset,
        weights: &[f64],
        indices: Vec<usize>,
        depth:   usize,
        rng:     &mut ChaCha8Rng,
    ) -> TreeNode {
        let mut class_weights = [0.0; 2];
        for &i in &indices {
            class_weights[usize::from(dataset.labels[i])] += weights[i];
        }
        let impurity  = gini(class_weights);
        let n_samples = indices.len();

        let leaf = |class_weights: [f64; 2], impurity: f64| TreeNode {
            class_weights,
            n_samples,
            impurity,
            split: None,
        };

        // Check stopping conditions
        if depth >= self.config.max_depth
            || n_samples < self.config.min_samples_split
            || n_samples < 2 * self.config.min_samples_leaf.max(1)
            || impurity <= MIN_GAIN
        {
            return leaf(class_weights, impurity);
        }

        let Some(best) = self.find_best_split(dataset, weights, &indices, class_weights, rng) else {
            return leaf(class_weights, impurity);
        };

        self.feature_importances[best.feature] += best.gain;

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| dataset.features[i][best.feature] <= best.threshold);

        let left  = self.build_tree(dataset, weights, left_idx,  depth + 1, rng);
        let right = self.build_tree(dataset, weights, right_idx, depth + 1, rng);

        TreeNode {
            class_weights,
            n_samples,
            impurity,
            split: Some(NodeSplit {
                feature:   best.feature,
                threshold: best.threshold,
                left:      Box::new(left),
                right:     Box::new(right),
            }),
        }
    }

    /// Sweep every feature's sorted values for the best threshold.
    fn find_best_split(
        &self,
        dataset: &Dataset,
        weights: &[f64],
        indices: &[usize],
        parent:  [f64; 2],
        rng:     &mut ChaCha8Rng,
    ) -> Option<BestSplit> {
        let n        = indices.len();
        let min_leaf = self.config.min_samples_leaf.max(1);
        let parent_w = parent[0] + parent[1];
        let parent_cost = parent_w * gini(parent);
        let min_gain    = MIN_GAIN * parent_w.max(1.0);

        let mut features: Vec<usize> = (0..dataset.n_features()).collect();
        features.shuffle(rng);

        let mut best: Option<BestSplit> = None;
        let mut sorted = indices.to_vec();

        for feature in features {
            let value = |i: usize| dataset.features[i][feature];
            sorted.sort_by(|&a, &b| value(a).total_cmp(&value(b)));

            let mut left = [0.0; 2];
            for pos in 0..n - 1 {
                let row = sorted[pos];
                left[usize::from(dataset.labels[row])] += weights[row];

                let (here, next) = (value(row), value(sorted[pos + 1]));
                if here == next {
                    continue;
                }

                let n_left = pos + 1;
                if n_left < min_leaf || n - n_left < min_leaf {
                    continue;
                }

                let right  = [parent[0] - left[0], parent[1] - left[1]];
                let left_w = left[0] + left[1];
                let right_w = right[0] + right[1];
                let gain = parent_cost - left_w * gini(left) - right_w * gini(right);

                if gain > min_gain && best.as_ref().map_or(true, |b| gain > b.gain) {
                    let mut threshold = (here + next) / 2.0;
                    if threshold >= next {
                        threshold = here;
                    }
                    best = Some(BestSplit { feature, threshold, gain });
                }
            }
        }

        best
    }
}

impl Classifier for DecisionTreeClassifier {
    fn predict_one(&self, row: &[f64]) -> u8 {
        let Some(mut node) = self.root.as_ref() else {
            return 0;
        };
        while let Some(split) = &node.split {
            node = if row[split.feature] <= split.threshold {
                &split.left
            } else {
                &split.right
            };
        }
        node.class()
    }

    fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn threshold_dataset(n: usize) -> Dataset {
        // x0 decides the class, x1 is noise
        Dataset::new(
            vec!["signal".into(), "noise".into()],
            (0..n).map(|i| vec![i as f64, ((i * 7) % 13) as f64]).collect(),
            (0..n).map(|i| u8::from(i >= n / 2)).collect(),
        )
    }

    #[test]
    fn test_learns_threshold() {
        let data = threshold_dataset(100);
        let mut tree = DecisionTreeClassifier::new(TreeConfig::default());
        tree.fit(&data).unwrap();

        let correct = data
            .features
            .iter()
            .zip(&data.labels)
            .filter(|(row, &label)| tree.predict_one(row) == label)
            .count();
        assert_eq!(correct, 100);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.feature_importances(), &[1.0, 0.0]);
    }

    #[test]
    fn test_respects_max_depth() {
        // Alternating labels need many splits
        let data = Dataset::new(
            vec!["x".into()],
            (0..400).map(|i| vec![i as f64]).collect(),
            (0..400).map(|i| u8::from((i / 20) % 2 == 1)).collect(),
        );
        let mut tree = DecisionTreeClassifier::new(TreeConfig { max_depth: 3, ..TreeConfig::default() });
        tree.fit(&data).unwrap();
        assert!(tree.depth() <= 3);
    }

    #[test]
    fn test_respects_min_samples_leaf() {
        fn min_leaf(node: &TreeNode) -> usize {
            match &node.split {
                None    => node.n_samples,
                Some(s) => min_leaf(&s.left).min(min_leaf(&s.right)),
            }
        }

        // One odd row out: isolating it would need a 1-row leaf
        let data = Dataset::new(
            vec!["x".into()],
            (0..60).map(|i| vec![i as f64]).collect(),
            (0..60).map(|i| u8::from(i == 59 || i < 30)).collect(),
        );
        let mut tree = DecisionTreeClassifier::new(TreeConfig::default());
        tree.fit(&data).unwrap();

        let root = tree.root().unwrap();
        assert!(min_leaf(root) >= 5);
    }

    #[test]
    fn test_min_samples_split_stops_growth() {
        let data = threshold_dataset(8);
        let mut tree = DecisionTreeClassifier::new(TreeConfig::default());
        tree.fit(&data).unwrap();
        // 8 rows < min_samples_split (10): the root stays a leaf
        assert!(tree.root().unwrap().split.is_none());
        assert_eq!(tree.feature_importances(), &[0.0, 0.0]);
    }

    #[test]
    fn test_balanced_weights_equalise_classes() {
        let weights = sample_weights(&[0, 0, 0, 1]);
        // n / (2 * n_c): 4 / 6 for class 0, 4 / 2 for class 1
        assert!((weights[0] - 4.0 / 6.0).abs() < 1e-12);
        assert!((weights[3] - 2.0).abs() < 1e-12);
        let class0: f64 = weights[..3].iter().sum();
        assert!((class0 - weights[3]).abs() < 1e-12);
    }

    #[test]
    fn test_balanced_tie_resolves_to_class_zero() {
        // 9 no / 1 yes can't split (< min_samples_split): balanced weights tie → class 0
        let data = Dataset::new(
            vec!["x".into()],
            (0..9).map(|i| vec![i as f64]).collect(),
            vec![0, 0, 0, 0, 0, 0, 0, 0, 1],
        );
        let mut tree = DecisionTreeClassifier::new(TreeConfig::default());
        tree.fit(&data).unwrap();
        let root = tree.root().unwrap();
        assert!((root.proportions()[0] - 0.5).abs() < 1e-12);
        assert_eq!(root.class(), 0);
    }

    #[test]
    fn test_importances_sum_to_one() {
        let data = Dataset::new(
            vec!["a".into(), "b".into()],
            (0..200).map(|i| vec![(i % 10) as f64, (i / 10) as f64]).collect(),
            (0..200).map(|i| u8::from(i % 10 > 6 || i / 10 > 15)).collect(),
        );
        let mut tree = DecisionTreeClassifier::new(TreeConfig::default());
        tree.fit(&data).unwrap();

        let sum: f64 = tree.feature_importances().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_same_tree() {
        let data = threshold_dataset(120);
        let mut a = DecisionTreeClassifier::new(TreeConfig::default());
        let mut b = DecisionTreeClassifier::new(TreeConfig::default());
        a.fit(&data).unwrap();
        b.fit(&data).unwrap();
        assert_eq!(a.feature_importances(), b.feature_importances());
        assert_eq!(a.n_leaves(), b.n_leaves());
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let mut tree = DecisionTreeClassifier::new(TreeConfig::default());
        assert!(tree.fit(&Dataset::default()).is_err());
    }
}
