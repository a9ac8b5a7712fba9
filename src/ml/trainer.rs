// ============================================================
// Layer 5 — Decision Tree Trainer (CART)
// ============================================================
// Grows a DecisionTree from word-count vectors and labels.
//
// Greedy, top-down:
//   1. Count classes at the node and measure its impurity.
//   2. Stop (make a leaf) if the node is pure, too deep, or
//      too small to split.
//   3. Otherwise try every feature: sort the node's samples by
//      that feature and try a threshold halfway between each
//      pair of neighbouring distinct values.
//   4. Keep the split with the lowest weighted child impurity
//      (the first one found wins ties), partition the samples
//      and recurse left then right.
//
// With word counts most features only take the values 0 and 1,
// so nearly every threshold ends up as 0.5.
//
// Reference: Breiman et al. (1984) Classification and Regression Trees
//            rand crate documentation (seeded shuffling)

use anyhow::Result;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::domain::label::Label;
use crate::ml::model::{DecisionTree, Split, TreeConfig, TreeNode};

// Two feature values closer than this are treated as equal,
// so no threshold is placed between them.
const FEATURE_THRESHOLD: f64 = 1e-7;

/// Fit a decision tree on `samples` (one feature vector per row)
/// and the parallel `labels`.
pub fn fit_tree(config: &TreeConfig, samples: &[Vec<f64>], labels: &[Label]) -> Result<DecisionTree> {
    check_inputs(config, samples, labels)?;

    // ── Map labels to class indices ───────────────────────────────────────────
    let mut classes: Vec<Label> = labels.to_vec();
    classes.sort();
    classes.dedup();

    let targets: Vec<usize> = labels
        .iter()
        .map(|l| classes.binary_search(l).unwrap_or_default())
        .collect();

    let n_features = samples[0].len();
    let mut grower = Grower {
        config,
        samples,
        targets:   &targets,
        n_classes: classes.len(),
        nodes:     Vec::new(),
        rng:       config.random_state.map(StdRng::seed_from_u64),
    };

    grower.grow((0..samples.len()).collect(), 0);

    let tree = DecisionTree {
        nodes: grower.nodes,
        classes,
        n_features,
        criterion: config.criterion,
    };

    tracing::info!(
        "Decision tree fitted: {} nodes, {} leaves, depth {}",
        tree.n_nodes(),
        tree.n_leaves(),
        tree.depth()
    );
    Ok(tree)
}

fn check_inputs(config: &TreeConfig, samples: &[Vec<f64>], labels: &[Label]) -> Result<()> {
    if samples.is_empty() {
        anyhow::bail!("Cannot fit a decision tree on zero samples");
    }
    if samples.len() != labels.len() {
        anyhow::bail!(
            "Got {} feature vectors but {} labels",
            samples.len(),
            labels.len()
        );
    }
    let width = samples[0].len();
    if let Some(row) = samples.iter().position(|s| s.len() != width) {
        anyhow::bail!(
            "Feature vector {row} has {} entries, expected {width}",
            samples[row].len()
        );
    }
    if config.min_samples_split < 2 {
        anyhow::bail!("min_samples_split must be at least 2, got {}", config.min_samples_split);
    }
    if config.min_samples_leaf < 1 {
        anyhow::bail!("min_samples_leaf must be at least 1");
    }
    if config.max_depth == Some(0) {
        anyhow::bail!("max_depth must be at least 1");
    }
    Ok(())
}

// ─── Candidate split found during the search ──────────────────────────────────
struct Candidate {
    feature:   usize,
    threshold: f64,
    score:     f64, // weighted child impurity, lower is better
}

// ─── Grower ───────────────────────────────────────────────────────────────────
// Holds the borrowed training data while nodes are appended.
struct Grower<'a> {
    config:    &'a TreeConfig,
    samples:   &'a [Vec<f64>],
    targets:   &'a [usize],
    n_classes: usize,
    nodes:     Vec<TreeNode>,
    rng:       Option<StdRng>,
}

impl Grower<'_> {
    /// Grow the subtree for `indices` and return its root's node index.
    fn grow(&mut self, indices: Vec<usize>, depth: usize) -> usize {
        let value    = self.class_counts(&indices);
        let impurity = self.config.criterion.impurity(&value);
        let n        = indices.len();

        let node_id = self.nodes.len();
        self.nodes.push(TreeNode {
            split: None,
            impurity,
            n_samples: n,
            value: value.clone(),
            depth,
        });

        let pure      = value.iter().filter(|&&c| c > 0).count() <= 1;
        let too_deep  = self.config.max_depth.is_some_and(|max| depth >= max);
        let too_small = n < self.config.min_samples_split || n < 2 * self.config.min_samples_leaf;

        if pure || too_deep || too_small {
            return node_id;
        }

        let Some(best) = self.best_split(&indices, &value) else {
            return node_id;
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| self.samples[i][best.feature] <= best.threshold);

        tracing::debug!(
            "Node {node_id} (depth {depth}): split feature {} at {:.2} → {} left, {} right",
            best.feature,
            best.threshold,
            left_idx.len(),
            right_idx.len()
        );

        let left  = self.grow(left_idx, depth + 1);
        let right = self.grow(right_idx, depth + 1);

        self.nodes[node_id].split = Some(Split {
            feature:   best.feature,
            threshold: best.threshold,
            left,
            right,
        });
        node_id
    }

    /// Search every feature for the split with the lowest weighted impurity.
    fn best_split(&mut self, indices: &[usize], parent_value: &[usize]) -> Option<Candidate> {
        let n         = indices.len();
        let min_leaf  = self.config.min_samples_leaf;
        let criterion = self.config.criterion;

        let mut features: Vec<usize> = (0..self.samples[0].len()).collect();
        if let Some(rng) = self.rng.as_mut() {
            features.shuffle(rng);
        }

        let mut best: Option<Candidate> = None;

        for feature in features {
            // (value, class) pairs for this node, sorted by value
            let mut column: Vec<(f64, usize)> = indices
                .iter()
                .map(|&i| (self.samples[i][feature], self.targets[i]))
                .collect();
            column.sort_by(|a, b| a.0.total_cmp(&b.0));

            // Constant feature → nothing to split on
            if column[n - 1].0 <= column[0].0 + FEATURE_THRESHOLD {
                continue;
            }

            let mut left_counts  = vec![0usize; self.n_classes];
            let mut right_counts = parent_value.to_vec();

            for pos in 0..n - 1 {
                let (value, class) = column[pos];
                left_counts[class]  += 1;
                right_counts[class] -= 1;

                let next = column[pos + 1].0;
                if next <= value + FEATURE_THRESHOLD {
                    continue;
                }

                let n_left  = pos + 1;
                let n_right = n - n_left;
                if n_left < min_leaf || n_right < min_leaf {
                    continue;
                }

                let score = (n_left as f64 * criterion.impurity(&left_counts)
                    + n_right as f64 * criterion.impurity(&right_counts))
                    / n as f64;

                if best.as_ref().map_or(true, |b| score < b.score) {
                    let mut threshold = (value + next) / 2.0;
                    // Guard against the midpoint rounding up onto `next`
                    if threshold >= next {
                        threshold = value;
                    }
                    best = Some(Candidate { feature, threshold, score });
                }
            }
        }

        best
    }

    fn class_counts(&self, indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &i in indices {
            counts[self.targets[i]] += 1;
        }
        counts
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        assembler::LabeledCorpus,
        corpus::{NEGATIVE_TEXTS, POSITIVE_TEXTS, TEST_TEXTS},
        vectorizer::CountVectorizer,
    };
    use crate::domain::label::Label::{Negative as N, Positive as P};

    fn tutorial_tree(config: &TreeConfig) -> (CountVectorizer, DecisionTree) {
        let corpus = LabeledCorpus::assemble(&NEGATIVE_TEXTS, &POSITIVE_TEXTS);
        let (vectorizer, vectors) = CountVectorizer::fit_transform(corpus.texts()).unwrap();
        let tree = fit_tree(config, &vectors, corpus.labels()).unwrap();
        (vectorizer, tree)
    }

    #[test]
    fn test_perfect_fit_on_training_data() {
        let corpus = LabeledCorpus::assemble(&NEGATIVE_TEXTS, &POSITIVE_TEXTS);
        let (vectorizer, tree) = tutorial_tree(&TreeConfig::default());
        let preds = tree.predict_batch(&vectorizer.transform(corpus.texts()));
        assert_eq!(preds, corpus.labels());
    }

    #[test]
    fn test_tutorial_tree_shape() {
        let (vectorizer, tree) = tutorial_tree(&TreeConfig::default());
        let names = vectorizer.feature_names();

        // "hate" and "love" split the root equally well; "hate" has
        // the lower column so it is found first.
        let root = tree.node(0).unwrap().split.unwrap();
        assert_eq!(names[root.feature], "hate");
        assert_eq!(root.threshold, 0.5);

        let inner = tree.node(root.left).unwrap().split.unwrap();
        assert_eq!(names[inner.feature], "bad");

        assert_eq!(tree.n_nodes(),  5);
        assert_eq!(tree.n_leaves(), 3);
        assert_eq!(tree.depth(),    2);
        assert_eq!(tree.node(0).unwrap().value, vec![5, 5]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_tutorial_test_predictions() {
        let (vectorizer, tree) = tutorial_tree(&TreeConfig::default());
        let preds = tree.predict_batch(&vectorizer.transform(&TEST_TEXTS));
        assert_eq!(preds, vec![P, P, N, P, N, P]);
    }

    #[test]
    fn test_same_seed_same_tree() {
        let config = TreeConfig { random_state: Some(7), ..TreeConfig::default() };
        let (_, a) = tutorial_tree(&config);
        let (_, b) = tutorial_tree(&config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let config   = TreeConfig { max_depth: Some(1), ..TreeConfig::default() };
        let (_, tree) = tutorial_tree(&config);
        assert_eq!(tree.depth(),    1);
        assert_eq!(tree.n_leaves(), 2);
    }

    #[test]
    fn test_entropy_also_fits_perfectly() {
        let config = TreeConfig { criterion: crate::ml::model::Criterion::Entropy, ..TreeConfig::default() };
        let corpus = LabeledCorpus::assemble(&NEGATIVE_TEXTS, &POSITIVE_TEXTS);
        let (vectorizer, tree) = tutorial_tree(&config);
        let preds = tree.predict_batch(&vectorizer.transform(corpus.texts()));
        assert_eq!(preds, corpus.labels());
    }

    #[test]
    fn test_single_class_gives_single_leaf() {
        let samples = vec![vec![0.0], vec![1.0]];
        let tree    = fit_tree(&TreeConfig::default(), &samples, &[P, P]).unwrap();
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.classes(), &[P]);
        assert_eq!(tree.predict(&[5.0]), P);
    }

    #[test]
    fn test_identical_features_cannot_split() {
        let samples = vec![vec![1.0], vec![1.0], vec![1.0]];
        let tree    = fit_tree(&TreeConfig::default(), &samples, &[N, P, P]).unwrap();
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.predict(&[1.0]), P);
    }

    #[test]
    fn test_min_samples_leaf_is_respected() {
        let samples = vec![vec![0.0], vec![1.0], vec![1.0], vec![1.0]];
        let config  = TreeConfig { min_samples_leaf: 2, ..TreeConfig::default() };
        let tree    = fit_tree(&config, &samples, &[N, P, P, P]).unwrap();
        assert!(tree.nodes().iter().all(|n| n.n_samples >= 2));
    }

    #[test]
    fn test_rejects_bad_input() {
        let cfg = TreeConfig::default();
        assert!(fit_tree(&cfg, &[], &[]).is_err());
        assert!(fit_tree(&cfg, &[vec![1.0]], &[N, P]).is_err());
        assert!(fit_tree(&cfg, &[vec![1.0], vec![1.0, 2.0]], &[N, P]).is_err());

        let zero_depth = TreeConfig { max_depth: Some(0), ..TreeConfig::default() };
        assert!(fit_tree(&zero_depth, &[vec![1.0]], &[N]).is_err());
    }
}
