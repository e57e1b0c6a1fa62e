//! Configuration for training and serving a chatbot.
//!
//! Every section has defaults, so a configuration file only needs to name
//! the values it changes.
//!
//! # Examples
//!
//! ```
//! use palaver::config::{FeatureNorm, PalaverConfig};
//!
//! let config = PalaverConfig::default();
//! assert_eq!(config.features.max_ngram, 4);
//! assert_eq!(config.features.norm, FeatureNorm::None);
//! assert_eq!(config.classifier.max_iterations, 10_000);
//!
//! let config: PalaverConfig =
//!     serde_json::from_str(r#"{"features": {"norm": "l2"}, "seed": 7}"#).unwrap();
//! assert_eq!(config.features.norm, FeatureNorm::L2);
//! assert_eq!(config.features.max_ngram, 4);
//! assert_eq!(config.seed, Some(7));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PalaverError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PalaverConfig {
    /// Text normalization resources.
    pub analysis: AnalysisConfig,
    /// TF-IDF feature extraction.
    pub features: VectorizerConfig,
    /// Logistic regression fitting.
    pub classifier: LogisticRegressionConfig,
    /// Seed for response selection. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl PalaverConfig {
    /// Read a JSON configuration file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: PalaverConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<()> {
        self.features.validate()?;
        self.classifier.validate()
    }
}

/// Normalizer resources. Unset fields use the bundled English resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Replacement stop-word list.
    pub stop_words: Option<Vec<String>>,
    /// Replacement lemma lexicon (`lemma,inflection,...` CSV).
    pub lemma_lexicon: Option<PathBuf>,
}

/// Per-vector normalization applied after TF-IDF weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureNorm {
    /// Raw count multiplied by idf.
    #[default]
    None,
    /// Rescale each non-zero vector to unit Euclidean length.
    L2,
}

/// Configuration of the TF-IDF vectorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Longest word n-gram in the vocabulary.
    pub max_ngram: usize,
    /// Vector normalization.
    pub norm: FeatureNorm,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_ngram: 4,
            norm: FeatureNorm::None,
        }
    }
}

impl VectorizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_ngram == 0 {
            return Err(PalaverError::config("max_ngram must be at least 1"));
        }
        Ok(())
    }
}

/// Configuration of the multinomial logistic regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticRegressionConfig {
    /// Upper bound on optimizer iterations.
    pub max_iterations: usize,
    /// Inverse of the L2 regularization strength.
    pub c: f64,
    /// Convergence threshold on the largest absolute gradient component.
    pub tolerance: f64,
}

impl Default for LogisticRegressionConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            c: 1.0,
            tolerance: 1e-4,
        }
    }
}

impl LogisticRegressionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(PalaverError::config("max_iterations must be at least 1"));
        }
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(PalaverError::config(format!(
                "c must be a positive number, got {}",
                self.c
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(PalaverError::config(format!(
                "tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}
