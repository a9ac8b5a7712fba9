// ============================================================
// Layer 5 — Trained Model (Vectorizer + Tree)
// ============================================================
// Bundles the two fitted pieces that must always travel
// together: the vocabulary that turns a sentence into counts,
// and the tree that was trained on exactly those columns.
// Saving or loading one without the other would misalign the
// feature indices, so they are serialised as one record.
use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{assembler::LabeledCorpus, vectorizer::CountVectorizer};
use crate::domain::{label::Label, traits::TextClassifier};
use crate::ml::model::{DecisionTree, TreeConfig};
use crate::ml::trainer::fit_tree;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    pub vectorizer: CountVectorizer,
    pub tree:       DecisionTree,
}

impl TrainedModel {
    /// Fit the vocabulary on the corpus texts, vectorise them and grow a tree.
    pub fn train(config: &TreeConfig, corpus: &LabeledCorpus) -> Result<Self> {
        let (vectorizer, vectors) = CountVectorizer::fit_transform(corpus.texts())?;
        tracing::info!(
            "Vectorised {} sentences into {} features",
            vectors.len(),
            vectorizer.n_features()
        );
        let tree = fit_tree(config, &vectors, corpus.labels())?;
        Ok(Self { vectorizer, tree })
    }

    /// Vectorise and classify each text in order.
    pub fn predict<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Label> {
        self.tree.predict_batch(&self.vectorizer.transform(texts))
    }

    /// Check that a model read from disk is usable.
    pub fn validate(&self) -> Result<()> {
        self.tree.validate()?;
        if self.tree.n_features() != self.vectorizer.n_features() {
            anyhow::bail!(
                "Tree expects {} features but the vocabulary has {} terms",
                self.tree.n_features(),
                self.vectorizer.n_features()
            );
        }
        Ok(())
    }
}

impl TextClassifier for TrainedModel {
    fn classify(&self, text: &str) -> Label {
        self.tree.predict(&self.vectorizer.transform_one(text))
    }
}
