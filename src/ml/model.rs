// ============================================================
// Layer 5 — Decision Tree Model
// ============================================================
// The learned classifier: a binary tree stored as a flat array
// of nodes, root at index 0.
//
// Every internal node asks one question about one word count:
//
//   "is count(hate) <= 0.5 ?"   yes → left child, no → right child
//
// Leaves hold the class counts of the training samples that
// reached them; the prediction is the class with the most.
//
// Nodes are pushed in pre-order while the tree is grown, so a
// child always has a larger index than its parent. validate()
// checks exactly that, which guarantees predict() terminates
// even on a tree read back from disk.
//
// Training lives in trainer.rs; this file only describes the
// structure and walks it.
//
// Reference: Breiman et al. (1984) Classification and Regression Trees
//            Rust Book §6 (Enums), §8 (Vectors)

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::label::Label;

// ─── Split Criterion ──────────────────────────────────────────────────────────
/// How node impurity is measured when choosing splits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// 1 - Σ p²
    #[default]
    Gini,
    /// -Σ p·log2(p)
    Entropy,
}

impl Criterion {
    /// Impurity of a node with the given per-class sample counts.
    /// An empty node has impurity 0.
    pub fn impurity(self, counts: &[usize]) -> f64 {
        let total: usize = counts.iter().sum();
        if total == 0 {
            return 0.0;
        }
        let n = total as f64;

        match self {
            Criterion::Gini => {
                let sum_sq: f64 = counts
                    .iter()
                    .map(|&c| {
                        let p = c as f64 / n;
                        p * p
                    })
                    .sum();
                1.0 - sum_sq
            }
            Criterion::Entropy => counts
                .iter()
                .filter(|&&c| c > 0)
                .map(|&c| {
                    let p = c as f64 / n;
                    -p * p.log2()
                })
                .sum(),
        }
    }

    /// Name shown in rendered trees ("gini = 0.5")
    pub fn name(self) -> &'static str {
        match self {
            Criterion::Gini    => "gini",
            Criterion::Entropy => "entropy",
        }
    }
}

// ─── Hyper-parameters ─────────────────────────────────────────────────────────
/// Controls how far the tree is allowed to grow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    pub criterion: Criterion,

    /// Maximum depth of the tree; `None` grows until leaves are pure
    pub max_depth: Option<usize>,

    /// A node needs at least this many samples to be split
    pub min_samples_split: usize,

    /// Each child of a split must keep at least this many samples
    pub min_samples_leaf: usize,

    /// Seed for shuffling the order features are tried in.
    /// `None` tries features in column order, so equally good
    /// splits resolve to the lowest column.
    pub random_state: Option<u64>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            criterion:         Criterion::Gini,
            max_depth:         None,
            min_samples_split: 2,
            min_samples_leaf:  1,
            random_state:      None,
        }
    }
}

// ─── Nodes ────────────────────────────────────────────────────────────────────
/// The question asked at an internal node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// Column of the feature vector being tested
    pub feature: usize,
    /// Samples with `value <= threshold` go left
    pub threshold: f64,
    /// Index of the left child in the node array
    pub left: usize,
    /// Index of the right child in the node array
    pub right: usize,
}

/// One node of the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// `None` for leaves
    pub split: Option<Split>,
    /// Impurity of the training samples at this node
    pub impurity: f64,
    /// Number of training samples that reached this node
    pub n_samples: usize,
    /// Training sample count per class, indexed like `DecisionTree::classes`
    pub value: Vec<usize>,
    /// Distance from the root (root = 0)
    pub depth: usize,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.split.is_none()
    }

    /// Index of the majority class; ties go to the lower index.
    pub fn majority_class(&self) -> usize {
        let mut best = 0;
        for (i, &count) in self.value.iter().enumerate() {
            if count > self.value[best] {
                best = i;
            }
        }
        best
    }
}

// ─── DecisionTree ─────────────────────────────────────────────────────────────
/// A fitted decision tree classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub(crate) nodes:      Vec<TreeNode>,
    pub(crate) classes:    Vec<Label>,
    pub(crate) n_features: usize,
    pub(crate) criterion:  Criterion,
}

impl DecisionTree {
    /// Classify one feature vector.
    ///
    /// Columns beyond the end of `features` read as 0, which is
    /// what a word that never appears would count anyway.
    pub fn predict(&self, features: &[f64]) -> Label {
        let mut idx = 0usize;
        loop {
            let node = &self.nodes[idx];
            match node.split {
                None => return self.classes[node.majority_class()],
                Some(split) => {
                    let value = features.get(split.feature).copied().unwrap_or(0.0);
                    idx = if value <= split.threshold { split.left } else { split.right };
                }
            }
        }
    }

    /// Classify each feature vector in order.
    pub fn predict_batch(&self, samples: &[Vec<f64>]) -> Vec<Label> {
        samples.iter().map(|s| self.predict(s)).collect()
    }

    /// Check the structural invariants a well-formed tree has:
    /// a root exists, every child index points forward into the
    /// array, every leaf has one count per class, and split
    /// features are in range.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            anyhow::bail!("Decision tree has no nodes");
        }
        if self.classes.is_empty() {
            anyhow::bail!("Decision tree has no classes");
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if node.value.len() != self.classes.len() {
                anyhow::bail!(
                    "Node {i} has {} class counts but the tree has {} classes",
                    node.value.len(),
                    self.classes.len()
                );
            }
            if let Some(split) = node.split {
                for child in [split.left, split.right] {
                    if child <= i || child >= self.nodes.len() {
                        anyhow::bail!("Node {i} points to invalid child {child}");
                    }
                }
                if split.feature >= self.n_features {
                    anyhow::bail!(
                        "Node {i} splits on feature {} but the tree has {} features",
                        split.feature,
                        self.n_features
                    );
                }
            }
        }
        Ok(())
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Longest root-to-leaf path; a single leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// Distinct training labels in sorted order
    pub fn classes(&self) -> &[Label] {
        &self.classes
    }

    pub fn node(&self, index: usize) -> Option<&TreeNode> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }
}
