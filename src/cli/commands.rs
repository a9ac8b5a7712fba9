// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands and their flags:
//
//   train   — run the tutorial pipeline and save a checkpoint
//   predict — classify new sentences with a saved checkpoint
//   rules   — classify sentences with the keyword rules only
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::{Criterion, TreeConfig};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the decision tree, print predictions and draw the tree
    Train(TrainArgs),

    /// Classify sentences using a trained checkpoint
    Predict(PredictArgs),

    /// Classify sentences with the keyword rules only
    Rules(RulesArgs),
}

/// Impurity measure used to pick splits
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum CriterionArg {
    #[default]
    Gini,
    Entropy,
}

impl From<CriterionArg> for Criterion {
    fn from(c: CriterionArg) -> Self {
        match c {
            CriterionArg::Gini    => Criterion::Gini,
            CriterionArg::Entropy => Criterion::Entropy,
        }
    }
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// JSON file with "positive", "negative" and optional "test" sentence lists.
    /// Uses the built-in tutorial sentences when omitted.
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Directory to save the model, its config and metrics
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: PathBuf,

    /// Where to draw the tree (.svg, .dot or .gv)
    #[arg(long, default_value = "tree.svg")]
    pub tree_image: PathBuf,

    /// Impurity measure used to choose splits
    #[arg(long, value_enum, default_value_t = CriterionArg::Gini)]
    pub criterion: CriterionArg,

    /// Maximum tree depth (unlimited when omitted)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Minimum samples a node needs before it may be split
    #[arg(long, default_value_t = 2)]
    pub min_samples_split: usize,

    /// Minimum samples each child of a split must keep
    #[arg(long, default_value_t = 1)]
    pub min_samples_leaf: usize,

    /// Seed for the order features are tried in
    #[arg(long)]
    pub random_state: Option<u64>,

    /// Print the learned vocabulary (word → column)
    #[arg(long)]
    pub show_vocabulary: bool,

    /// Print the training count vectors
    #[arg(long)]
    pub show_vectors: bool,

    /// Print the tree as indented text
    #[arg(long)]
    pub show_tree: bool,
}

/// The application layer never sees clap types.
impl From<&TrainArgs> for TrainConfig {
    fn from(a: &TrainArgs) -> Self {
        TrainConfig {
            corpus:         a.corpus.clone(),
            checkpoint_dir: a.checkpoint_dir.clone(),
            tree_image:     a.tree_image.clone(),
            tree: TreeConfig {
                criterion:         a.criterion.into(),
                max_depth:         a.max_depth,
                min_samples_split: a.min_samples_split,
                min_samples_leaf:  a.min_samples_leaf,
                random_state:      a.random_state,
            },
        }
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Sentence to classify (repeat for several)
    #[arg(long = "text", required = true)]
    pub texts: Vec<String>,

    /// Directory where `train` saved its checkpoint
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: PathBuf,
}

#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Sentence to classify (repeat for several)
    #[arg(long = "text", required = true)]
    pub texts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_train_defaults() {
        let cli = Cli::try_parse_from(["sentiment-tree", "train"]).unwrap();
        let Commands::Train(args) = cli.command else { panic!("expected train") };
        let cfg = TrainConfig::from(&args);
        assert_eq!(cfg, TrainConfig::default());
    }

    #[test]
    fn test_train_tree_flags() {
        let cli = Cli::try_parse_from([
            "sentiment-tree", "train",
            "--criterion", "entropy",
            "--max-depth", "3",
            "--random-state", "42",
            "--tree-image", "out/tree.dot",
        ])
        .unwrap();
        let Commands::Train(args) = cli.command else { panic!("expected train") };
        let cfg = TrainConfig::from(&args);
        assert_eq!(cfg.tree.criterion,    Criterion::Entropy);
        assert_eq!(cfg.tree.max_depth,    Some(3));
        assert_eq!(cfg.tree.random_state, Some(42));
        assert_eq!(cfg.tree_image,        PathBuf::from("out/tree.dot"));
    }

    #[test]
    fn test_predict_needs_text() {
        assert!(Cli::try_parse_from(["sentiment-tree", "predict"]).is_err());

        let cli = Cli::try_parse_from([
            "sentiment-tree", "predict", "--text", "we hate you", "--text", "they are good",
        ])
        .unwrap();
        let Commands::Predict(args) = cli.command else { panic!("expected predict") };
        assert_eq!(args.texts, vec!["we hate you", "they are good"]);
    }
}
