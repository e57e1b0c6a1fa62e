//! English analyzer used to normalize utterances.
//!
//! # Pipeline
//!
//! 1. UnicodeWordTokenizer (UAX #29 word boundaries)
//! 2. LowercaseFilter
//! 3. AlphanumericFilter (drops punctuation and symbol tokens)
//! 4. StopFilter (English stop words)
//! 5. LemmaFilter (lexicon lookup, unknown words unchanged)

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::alphanumeric::AlphanumericFilter;
use crate::analysis::token_filter::lemma::{HashMapLemmatizer, LemmaFilter};
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::error::Result;

pub struct EnglishAnalyzer {
    inner: PipelineAnalyzer,
}

impl EnglishAnalyzer {
    /// Build the analyzer with the default stop words and bundled lexicon.
    pub fn new() -> Result<Self> {
        Self::with_resources(StopFilter::new(), HashMapLemmatizer::english())
    }

    /// Build the analyzer from a stop-word set and a lemma lexicon.
    ///
    /// Fails when a lemma of the lexicon is also a stop word.
    pub fn with_resources(
        stop_filter: StopFilter,
        lemmatizer: Arc<HashMapLemmatizer>,
    ) -> Result<Self> {
        lemmatizer.check_stop_words(&stop_filter)?;

        let analyzer = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(AlphanumericFilter::new()))
            .add_filter(Arc::new(stop_filter))
            .add_filter(Arc::new(LemmaFilter::with_lemmatizer(lemmatizer)))
            .with_name("english");

        Ok(Self { inner: analyzer })
    }
}

impl Default for EnglishAnalyzer {
    fn default() -> Self {
        Self::new().expect("English analyzer should be creatable with default settings")
    }
}

impl Analyzer for EnglishAnalyzer {
    fn analyze(&self, text: &str) -> TokenStream {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "english"
    }
}

impl Debug for EnglishAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnglishAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
