// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records one CSV row per training run so runs with different
// tree settings can be compared later.
//
// Output file: checkpoints/metrics.csv
//
//   n_samples,n_features,depth,leaves,train_accuracy,rule_agreement
//   10,12,2,3,1.000000,1.000000
//
//   train_accuracy — fraction of training sentences the tree
//                    labels the same as their true label
//   rule_agreement — fraction of test sentences on which the
//                    tree and the keyword rules agree
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::label::Label;

const HEADER: &str = "n_samples,n_features,depth,leaves,train_accuracy,rule_agreement";

/// Summary of a single training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub n_samples:      usize,
    pub n_features:     usize,
    pub depth:          usize,
    pub leaves:         usize,
    pub train_accuracy: f64,
    /// `None` when there were no test sentences to compare on
    pub rule_agreement: Option<f64>,
}

/// Fraction of positions where `a` and `b` hold the same label.
/// Returns `None` for empty input or mismatched lengths.
pub fn agreement(a: &[Label], b: &[Label]) -> Option<f64> {
    if a.is_empty() || a.len() != b.len() {
        return None;
    }
    let same = a.iter().zip(b).filter(|(x, y)| x == y).count();
    Some(same as f64 / a.len() as f64)
}

/// Appends run metrics to a CSV file.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the logger, writing the CSV header if the file is new.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create metrics directory '{}'", dir.display()))?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one run as a new CSV row. A missing agreement is left blank.
    pub fn log(&self, m: &RunMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        let agreement = m
            .rule_agreement
            .map(|a| format!("{a:.6}"))
            .unwrap_or_default();

        writeln!(
            f,
            "{},{},{},{},{:.6},{}",
            m.n_samples, m.n_features, m.depth, m.leaves, m.train_accuracy, agreement,
        )?;

        tracing::debug!("Logged run metrics to '{}'", self.csv_path.display());
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::label::Label::{Negative as N, Positive as P};

    #[test]
    fn test_agreement() {
        assert_eq!(agreement(&[P, N, P, N], &[P, N, N, N]), Some(0.75));
        assert_eq!(agreement(&[], &[]), None);
        assert_eq!(agreement(&[P], &[P, N]), None);
    }

    #[test]
    fn test_log_appends_rows_under_one_header() {
        let dir    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();
        let run    = RunMetrics {
            n_samples:      10,
            n_features:     12,
            depth:          2,
            leaves:         3,
            train_accuracy: 1.0,
            rule_agreement: Some(1.0),
        };
        logger.log(&run).unwrap();

        // A second logger on the same dir must not repeat the header
        let again = MetricsLogger::new(dir.path()).unwrap();
        again.log(&RunMetrics { rule_agreement: None, ..run }).unwrap();

        let csv   = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "10,12,2,3,1.000000,1.000000");
        assert_eq!(lines[2], "10,12,2,3,1.000000,");
    }
}
