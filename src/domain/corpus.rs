use serde::{Deserialize, Serialize};

/// The raw sentence lists, before any labelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    pub positive: Vec<String>,
    pub negative: Vec<String>,

    /// Sentences to predict after training
    #[serde(default)]
    pub test: Vec<String>,
}
