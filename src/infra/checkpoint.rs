// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores a trained model so `predict` can classify
// new sentences without retraining.
//
// Files written to the checkpoint directory:
//
//   checkpoints/
//     model.json          ← vocabulary + decision tree
//     train_config.json   ← the settings the model was trained with
//
// The vocabulary and the tree go into ONE file: the tree's
// split features are column indices into that vocabulary, so
// they are only meaningful together.
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json crate documentation

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::application::train_use_case::TrainConfig;
use crate::ml::inferencer::TrainedModel;

const MODEL_FILE:  &str = "model.json";
const CONFIG_FILE: &str = "train_config.json";

/// Manages saving and loading of model checkpoints.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Point at a checkpoint directory. Nothing is created until
    /// something is saved.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the vocabulary and tree to `model.json`.
    pub fn save_model(&self, model: &TrainedModel) -> Result<PathBuf> {
        self.ensure_dir()?;
        let path = self.dir.join(MODEL_FILE);

        let json = serde_json::to_string_pretty(model)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to save model to '{}'", path.display()))?;

        tracing::debug!("Saved model to '{}'", path.display());
        Ok(path)
    }

    /// Read `model.json` back and check it is well formed.
    pub fn load_model(&self) -> Result<TrainedModel> {
        let path = self.dir.join(MODEL_FILE);

        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read model from '{}'. Have you run 'train' first?",
                path.display()
            )
        })?;

        let model: TrainedModel = serde_json::from_str(&json)
            .with_context(|| format!("Corrupt model file '{}'", path.display()))?;
        model
            .validate()
            .with_context(|| format!("Invalid model in '{}'", path.display()))?;

        tracing::info!(
            "Loaded model from '{}' ({} features, {} tree nodes)",
            path.display(),
            model.vectorizer.n_features(),
            model.tree.n_nodes()
        );
        Ok(model)
    }

    /// Save the training configuration next to the model.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        self.ensure_dir()?;
        let path = self.dir.join(CONFIG_FILE);

        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    /// Load the configuration the saved model was trained with.
    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.dir.join(CONFIG_FILE);

        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read config from '{}'. \
                 Make sure you have run 'train' before 'predict'.",
                path.display()
            )
        })?;

        Ok(serde_json::from_str(&json)?)
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create checkpoint directory '{}'", self.dir.display()))
    }
}
