//! Intent corpus: tags, example patterns and canned responses.
//!
//! The corpus file is JSON, either a top-level array of intents or an object
//! with an `intents` array:
//!
//! ```json
//! [
//!   {"tag": "greeting", "patterns": ["Hi", "Hello"], "responses": ["Hello!"]},
//!   {"tag": "farewell", "patterns": ["Bye"], "responses": ["Goodbye!"]}
//! ]
//! ```
//!
//! Unknown fields on an intent are ignored.

use std::fs;
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PalaverError, Result};

/// One intent: a tag, its example phrasings and its candidate responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Unique identifier of the intent.
    pub tag: String,
    /// Example user utterances.
    pub patterns: Vec<String>,
    /// Candidate replies.
    pub responses: Vec<String>,
}

impl Intent {
    pub fn new<S, P, R>(tag: S, patterns: P, responses: R) -> Self
    where
        S: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Intent {
            tag: tag.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
            responses: responses.into_iter().map(Into::into).collect(),
        }
    }
}

/// Summary counts of a corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    pub intents: usize,
    pub patterns: usize,
    pub responses: usize,
}

/// A validated, read-only collection of intents.
///
/// Every intent has at least one pattern and one response, and tags are
/// unique and non-empty.
#[derive(Debug, Clone)]
pub struct IntentCorpus {
    intents: Vec<Intent>,
    positions: AHashMap<String, usize>,
}

impl IntentCorpus {
    /// Validate a list of intents and build the corpus.
    pub fn new(intents: Vec<Intent>) -> Result<Self> {
        if intents.is_empty() {
            return Err(PalaverError::corpus("corpus contains no intents"));
        }

        let mut positions = AHashMap::with_capacity(intents.len());
        for (position, intent) in intents.iter().enumerate() {
            if intent.tag.trim().is_empty() {
                return Err(PalaverError::corpus(format!(
                    "intent #{position} has an empty tag"
                )));
            }
            if intent.patterns.is_empty() {
                return Err(PalaverError::corpus(format!(
                    "intent '{}' has no patterns",
                    intent.tag
                )));
            }
            if intent.responses.is_empty() {
                return Err(PalaverError::corpus(format!(
                    "intent '{}' has no responses",
                    intent.tag
                )));
            }
            if positions.insert(intent.tag.clone(), position).is_some() {
                return Err(PalaverError::corpus(format!(
                    "duplicate tag '{}'",
                    intent.tag
                )));
            }
        }

        Ok(IntentCorpus { intents, positions })
    }

    /// Parse a corpus from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json)?;
        let intents = match document {
            Value::Array(_) => serde_json::from_value(document)?,
            Value::Object(mut object) => match object.remove("intents") {
                Some(intents) => serde_json::from_value(intents)?,
                None => {
                    return Err(PalaverError::corpus(
                        "expected an array of intents or an object with an 'intents' field",
                    ));
                }
            },
            _ => {
                return Err(PalaverError::corpus(
                    "expected an array of intents or an object with an 'intents' field",
                ));
            }
        };
        Self::new(intents)
    }

    /// Load a corpus from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// All intents in file order.
    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// Look up an intent by exact tag.
    pub fn intent(&self, tag: &str) -> Option<&Intent> {
        self.position(tag).map(|position| &self.intents[position])
    }

    /// Position of an intent in [`intents`](Self::intents).
    pub fn position(&self, tag: &str) -> Option<usize> {
        self.positions.get(tag).copied()
    }

    /// Tags in file order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.intents.iter().map(|intent| intent.tag.as_str())
    }

    /// Every `(tag, pattern)` pair, intents in file order.
    pub fn patterns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.intents.iter().flat_map(|intent| {
            intent
                .patterns
                .iter()
                .map(move |pattern| (intent.tag.as_str(), pattern.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            intents: self.intents.len(),
            patterns: self.intents.iter().map(|i| i.patterns.len()).sum(),
            responses: self.intents.iter().map(|i| i.responses.len()).sum(),
        }
    }
}
