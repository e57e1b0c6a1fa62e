//! Lemmatization token filter and lexicon-backed lemmatizer.
//!
//! Lemmatization reduces an inflected word to its dictionary base form using
//! a fixed lexicon. Words missing from the lexicon pass through unchanged.
//!
//! Lexicons are CSV files with one lemma per line followed by its inflected
//! forms:
//!
//! ```text
//! # lemma,inflection,inflection,...
//! go,goes,went,gone,going
//! person,people
//! ```
//!
//! A lexicon must be closed under lemmatization: a lemma never appears as an
//! inflection of another lemma. This keeps normalization idempotent.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::alphanumeric::AlphanumericFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::error::{PalaverError, Result};

const ENGLISH_LEXICON: &str = include_str!("../../../resources/en_lemmas.csv");

static ENGLISH_LEMMATIZER: LazyLock<Arc<HashMapLemmatizer>> = LazyLock::new(|| {
    Arc::new(
        HashMapLemmatizer::from_reader(ENGLISH_LEXICON.as_bytes())
            .expect("bundled English lexicon should be well-formed"),
    )
});

/// Trait for lemmatization algorithms.
pub trait Lemmatizer: Send + Sync {
    /// Reduce a word to its base form, returning the word itself when unknown.
    fn lemmatize(&self, word: &str) -> String;

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}

/// Lemmatizer backed by an inflection → lemma table.
#[derive(Debug, Clone, Default)]
pub struct HashMapLemmatizer {
    values: HashMap<String, String>,
}

impl HashMapLemmatizer {
    /// Load a lexicon from CSV data.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b',')
            .comment(Some(b'#'))
            .flexible(true)
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut values = HashMap::<String, String>::new();
        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let mut fields = record.iter().filter(|field| !field.is_empty());
            let Some(lemma) = fields.next() else {
                continue;
            };
            Self::check_entry(lemma, line)?;

            for inflection in fields {
                Self::check_entry(inflection, line)?;
                if let Some(previous) = values.insert(inflection.to_string(), lemma.to_string())
                {
                    if previous != lemma {
                        return Err(PalaverError::analysis(format!(
                            "lexicon line {line}: '{inflection}' maps to both '{previous}' and '{lemma}'"
                        )));
                    }
                }
            }
        }

        let lemmatizer = Self { values };
        lemmatizer.check_closed()?;
        Ok(lemmatizer)
    }

    /// Load a lexicon from a CSV file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|e| {
            PalaverError::analysis(format!(
                "cannot open lemma lexicon '{}': {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_reader(file)
    }

    /// The bundled English lexicon.
    pub fn english() -> Arc<Self> {
        Arc::clone(&ENGLISH_LEMMATIZER)
    }

    /// Number of inflected forms known to the lexicon.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the lexicon is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the distinct lemmas of the lexicon.
    pub fn lemmas(&self) -> impl Iterator<Item = &str> {
        let mut lemmas: Vec<&str> = self.values.values().map(String::as_str).collect();
        lemmas.sort_unstable();
        lemmas.dedup();
        lemmas.into_iter()
    }

    /// Reject lexicons whose lemmas would be removed by the stop filter.
    pub fn check_stop_words(&self, stop_filter: &StopFilter) -> Result<()> {
        match self.lemmas().find(|lemma| stop_filter.is_stop_word(lemma)) {
            Some(lemma) => Err(PalaverError::analysis(format!(
                "lemma '{lemma}' is also a stop word"
            ))),
            None => Ok(()),
        }
    }

    fn check_entry(word: &str, line: u64) -> Result<()> {
        if !AlphanumericFilter::is_alphanumeric(word) || word.to_lowercase() != word {
            return Err(PalaverError::analysis(format!(
                "lexicon line {line}: '{word}' is not a lowercase alphanumeric word"
            )));
        }
        Ok(())
    }

    fn check_closed(&self) -> Result<()> {
        for (inflection, lemma) in &self.values {
            if let Some(other) = self.values.get(lemma) {
                if other != lemma {
                    return Err(PalaverError::analysis(format!(
                        "lemma '{lemma}' of '{inflection}' is itself an inflection of '{other}'"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl<I> From<I> for HashMapLemmatizer
where
    I: Iterator<Item = (String, String)>,
{
    fn from(values_it: I) -> Self {
        Self {
            values: values_it.collect(),
        }
    }
}

impl Lemmatizer for HashMapLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        self.values
            .get(word)
            .cloned()
            .unwrap_or_else(|| word.to_string())
    }

    fn name(&self) -> &'static str {
        "hash_map"
    }
}

/// Filter that replaces each token with its lemma.
pub struct LemmaFilter {
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl std::fmt::Debug for LemmaFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemmaFilter")
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}

impl LemmaFilter {
    /// Create a lemma filter backed by the bundled English lexicon.
    pub fn new() -> Self {
        Self::with_lemmatizer(HashMapLemmatizer::english())
    }

    /// Create a lemma filter with a custom lemmatizer.
    pub fn with_lemmatizer(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        LemmaFilter { lemmatizer }
    }
}

impl Default for LemmaFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for LemmaFilter {
    fn filter(&self, tokens: TokenStream) -> TokenStream {
        let lemmatizer = Arc::clone(&self.lemmatizer);
        Box::new(tokens.map(move |token| {
            let lemma = lemmatizer.lemmatize(&token.text);
            Token::new(lemma)
        }))
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}
