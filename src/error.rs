//! Error types for Palaver.
//!
//! All fallible operations return [`PalaverError`] through the [`Result`]
//! alias. Only startup work can fail: loading the corpus, the configuration
//! or a lemma lexicon, and fitting the model. Inference never returns an error.
//!
//! # Examples
//!
//! ```
//! use palaver::error::{PalaverError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(PalaverError::corpus("intent 'greeting' has no patterns"))
//! }
//!
//! let err = load().unwrap_err();
//! assert_eq!(err.to_string(), "Corpus error: intent 'greeting' has no patterns");
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Palaver operations.
#[derive(Error, Debug)]
pub enum PalaverError {
    /// I/O errors (corpus, config, lexicon or log files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV errors from the lemma lexicon or the conversation log.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Analysis-related errors (lexicon consistency, stop-word setup).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Malformed or inconsistent intent corpus.
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Model fitting errors.
    #[error("Training error: {0}")]
    Training(String),

    /// Invalid configuration values.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A tag that is not part of the corpus.
    #[error("Unknown intent: {0}")]
    UnknownIntent(String),
}

/// Result type alias for operations that may fail with PalaverError.
pub type Result<T> = std::result::Result<T, PalaverError>;

impl PalaverError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        PalaverError::Analysis(msg.into())
    }

    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        PalaverError::Corpus(msg.into())
    }

    /// Create a new training error.
    pub fn training<S: Into<String>>(msg: S) -> Self {
        PalaverError::Training(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        PalaverError::Config(msg.into())
    }

    /// Create a new unknown intent error.
    pub fn unknown_intent<S: Into<String>>(tag: S) -> Self {
        PalaverError::UnknownIntent(tag.into())
    }
}
