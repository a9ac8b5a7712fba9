// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// Loads a saved model and classifies new sentences with both
// the decision tree and the keyword rules, so the two can be
// compared sentence by sentence.
//
// The saved training settings are only reported; a checkpoint
// without train_config.json still classifies.

use anyhow::Result;
use std::path::PathBuf;

use crate::domain::{label::Label, traits::TextClassifier};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::{inferencer::TrainedModel, rules::RuleBasedClassifier};

/// Both classifiers' verdict on one sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub text:  String,
    pub tree:  Label,
    pub rules: Label,
}

impl Prediction {
    pub fn agrees(&self) -> bool {
        self.tree == self.rules
    }
}

pub struct PredictUseCase {
    model: TrainedModel,
    rules: RuleBasedClassifier,
}

impl PredictUseCase {
    /// Load the model saved by `train` from `checkpoint_dir`.
    pub fn new(checkpoint_dir: impl Into<PathBuf>) -> Result<Self> {
        let ckpt  = CheckpointManager::new(checkpoint_dir);
        let model = ckpt.load_model()?;

        match ckpt.load_config() {
            Ok(cfg) => tracing::info!(
                "Model in '{}' was trained with criterion={}, max_depth={:?}, random_state={:?}",
                ckpt.dir().display(),
                cfg.tree.criterion.name(),
                cfg.tree.max_depth,
                cfg.tree.random_state
            ),
            Err(e) => tracing::warn!("No training settings for '{}': {e:#}", ckpt.dir().display()),
        }

        Ok(Self::from_model(model))
    }

    pub fn from_model(model: TrainedModel) -> Self {
        Self { model, rules: RuleBasedClassifier::new() }
    }

    pub fn predict<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Prediction> {
        texts
            .iter()
            .map(|t| {
                let text = t.as_ref();
                Prediction {
                    text:  text.to_string(),
                    tree:  self.model.classify(text),
                    rules: self.rules.classify(text),
                }
            })
            .collect()
    }
}
