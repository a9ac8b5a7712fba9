// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Runs the whole tutorial pipeline in order:
//
//   Step 0: Check the tree image extension  (Layer 6 - infra)
//   Step 1: Load the sentence lists         (Layer 4 - data)
//   Step 2: Assemble texts + labels         (Layer 4 - data)
//   Step 3: Fit vectorizer and tree         (Layer 5 - ml)
//   Step 4: Predict the test sentences      (Layer 5 - ml)
//   Step 5: Draw the tree                   (Layer 6 - infra)
//   Step 6: Run the keyword rules           (Layer 5 - ml)
//   Step 7: Save checkpoint + metrics       (Layer 6 - infra)
//
// Nothing is printed here; everything the CLI wants to show is
// returned in a TrainOutcome.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::PathBuf};

use crate::data::{
    assembler::LabeledCorpus,
    corpus::{BuiltinCorpus, JsonCorpusFile},
};
use crate::domain::{
    corpus::Corpus,
    label::Label,
    traits::{CorpusSource, TextClassifier},
};
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::{agreement, MetricsLogger, RunMetrics},
    render::{export_text, image_format, render},
};
use crate::ml::{inferencer::TrainedModel, model::TreeConfig, rules::RuleBasedClassifier};

// ─── Training Configuration ──────────────────────────────────────────────────
// Everything a training run needs. Serialisable so the settings
// a checkpoint was made with are saved alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// JSON corpus file; `None` uses the built-in sentences
    pub corpus:         Option<PathBuf>,
    pub checkpoint_dir: PathBuf,
    /// Where the drawn tree goes (.svg, .dot or .gv)
    pub tree_image:     PathBuf,
    pub tree:           TreeConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            corpus:         None,
            checkpoint_dir: PathBuf::from("checkpoints"),
            tree_image:     PathBuf::from("tree.svg"),
            tree:           TreeConfig::default(),
        }
    }
}

// ─── What a run produced ─────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    /// term → column index
    pub vocabulary:       BTreeMap<String, usize>,
    /// Count vectors of the training sentences, in corpus order
    pub training_vectors: Vec<Vec<f64>>,
    pub tree_predictions: Vec<Label>,
    pub rule_predictions: Vec<Label>,
    /// Indented text dump of the learned rules
    pub tree_text:        String,
    pub image_path:       PathBuf,
    pub metrics:          RunMetrics,
    /// CSV the metrics row was appended to
    pub metrics_path:     PathBuf,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full pipeline end to end
    pub fn execute(&self) -> Result<TrainOutcome> {
        let cfg = &self.config;

        // ── Step 0: Fail before any work if the image can't be written ──────
        image_format(&cfg.tree_image)?;

        // ── Step 1: Load the sentence lists ──────────────────────────────────
        let corpus = self.load_corpus()?;
        tracing::info!(
            "Corpus: {} positive, {} negative, {} test sentences",
            corpus.positive.len(),
            corpus.negative.len(),
            corpus.test.len()
        );

        // ── Step 2: Negatives first, then positives, labels alongside ────────
        let training = LabeledCorpus::assemble(&corpus.negative, &corpus.positive);
        if training.is_empty() {
            anyhow::bail!("The corpus has no positive or negative training sentences");
        }
        for (i, example) in training.iter().enumerate() {
            tracing::trace!("Training pair {i}: ({:?}, {})", example.text, example.label);
        }
        if let Some(example) = training.example(3) {
            tracing::debug!("Example pair at index 3: ({:?}, {})", example.text, example.label);
        }

        // ── Step 3: Vocabulary + tree ────────────────────────────────────────
        let model            = TrainedModel::train(&cfg.tree, &training)?;
        let feature_names    = model.vectorizer.feature_names();
        let training_vectors = model.vectorizer.transform(training.texts());

        let fitted         = model.tree.predict_batch(&training_vectors);
        let train_accuracy = agreement(&fitted, training.labels()).unwrap_or(0.0);
        tracing::info!("Training accuracy: {:.1}%", train_accuracy * 100.0);

        // ── Step 4: Predict unseen sentences ─────────────────────────────────
        let tree_predictions = model.predict(&corpus.test);

        // ── Step 5: Draw the tree ────────────────────────────────────────────
        render(&model.tree, &feature_names).save(&cfg.tree_image)?;
        let tree_text = export_text(&model.tree, &feature_names);

        // ── Step 6: Keyword baseline on the same sentences ───────────────────
        let rule_predictions = RuleBasedClassifier::new().classify_all(&corpus.test);
        let rule_agreement   = agreement(&tree_predictions, &rule_predictions);
        if let Some(a) = rule_agreement {
            tracing::info!("Tree and keyword rules agree on {:.1}% of test sentences", a * 100.0);
        }

        // ── Step 7: Persist model, config and metrics ────────────────────────
        let ckpt = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt.save_model(&model)?;
        ckpt.save_config(cfg)?;

        let metrics = RunMetrics {
            n_samples:  training.len(),
            n_features: model.vectorizer.n_features(),
            depth:      model.tree.depth(),
            leaves:     model.tree.n_leaves(),
            train_accuracy,
            rule_agreement,
        };
        let logger = MetricsLogger::new(&cfg.checkpoint_dir)?;
        logger.log(&metrics)?;
        tracing::info!("Checkpoint saved to '{}'", cfg.checkpoint_dir.display());

        Ok(TrainOutcome {
            vocabulary: model.vectorizer.vocabulary().clone(),
            training_vectors,
            tree_predictions,
            rule_predictions,
            tree_text,
            image_path: cfg.tree_image.clone(),
            metrics,
            metrics_path: logger.csv_path().to_path_buf(),
        })
    }

    fn load_corpus(&self) -> Result<Corpus> {
        match &self.config.corpus {
            Some(path) => JsonCorpusFile::new(path).load(),
            None       => BuiltinCorpus.load(),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::label::Label::{Negative as N, Positive as P};
    use std::fs;

    fn config_in(dir: &std::path::Path) -> TrainConfig {
        TrainConfig {
            checkpoint_dir: dir.join("checkpoints"),
            tree_image:     dir.join("tree.svg"),
            ..TrainConfig::default()
        }
    }

    #[test]
    fn test_tutorial_run() {
        let dir     = tempfile::tempdir().unwrap();
        let outcome = TrainUseCase::new(config_in(dir.path())).execute().unwrap();

        assert_eq!(outcome.vocabulary.len(), 12);
        assert_eq!(outcome.vocabulary["hate"], 3);
        assert_eq!(outcome.training_vectors.len(), 10);
        assert_eq!(outcome.tree_predictions, vec![P, P, N, P, N, P]);
        assert_eq!(outcome.rule_predictions, vec![P, P, N, P, N, P]);
        assert_eq!(outcome.metrics.train_accuracy, 1.0);
        assert_eq!(outcome.metrics.rule_agreement, Some(1.0));
        assert!(outcome.tree_text.starts_with("|--- hate <= 0.50"));

        assert!(outcome.image_path.exists());
        assert!(dir.path().join("checkpoints/model.json").exists());
        assert!(dir.path().join("checkpoints/train_config.json").exists());
        assert_eq!(outcome.metrics_path, dir.path().join("checkpoints/metrics.csv"));
        assert!(outcome.metrics_path.exists());
    }

    #[test]
    fn test_run_from_json_corpus() {
        let dir         = tempfile::tempdir().unwrap();
        let corpus_path = dir.path().join("corpus.json");
        fs::write(
            &corpus_path,
            r#"{"positive": ["great food", "great service"],
                "negative": ["awful food", "awful service"],
                "test":     ["great coffee", "awful coffee"]}"#,
        )
        .unwrap();

        let cfg     = TrainConfig { corpus: Some(corpus_path), ..config_in(dir.path()) };
        let outcome = TrainUseCase::new(cfg).execute().unwrap();

        let terms: Vec<&String> = outcome.vocabulary.keys().collect();
        assert_eq!(terms, vec!["awful", "food", "great", "service"]);
        assert_eq!(outcome.tree_predictions, vec![P, N]);
        // Neither sentence contains "hate" or "bad"
        assert_eq!(outcome.rule_predictions, vec![P, P]);
        assert_eq!(outcome.metrics.rule_agreement, Some(0.5));
    }

    #[test]
    fn test_unsupported_image_extension_fails_before_training() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig { tree_image: dir.path().join("tree.png"), ..config_in(dir.path()) };

        let err = TrainUseCase::new(cfg).execute().unwrap_err().to_string();
        assert!(err.contains("png"), "{err}");
        // Nothing was fitted or saved
        assert!(!dir.path().join("checkpoints").exists());
        assert!(!dir.path().join("tree.png").exists());
    }

    #[test]
    fn test_bad_image_checked_before_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig {
            corpus:     Some(dir.path().join("missing.json")),
            tree_image: dir.path().join("tree.jpg"),
            ..config_in(dir.path())
        };
        let err = TrainUseCase::new(cfg).execute().unwrap_err().to_string();
        assert!(err.contains("Unsupported tree image format"), "{err}");
    }

    #[test]
    fn test_empty_corpus_fails() {
        let dir         = tempfile::tempdir().unwrap();
        let corpus_path = dir.path().join("corpus.json");
        fs::write(&corpus_path, r#"{"positive": [], "negative": []}"#).unwrap();

        let cfg = TrainConfig { corpus: Some(corpus_path), ..config_in(dir.path()) };
        assert!(TrainUseCase::new(cfg).execute().is_err());
        assert!(!dir.path().join("checkpoints").exists());
    }
}
