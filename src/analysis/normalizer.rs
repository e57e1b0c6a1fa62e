//! Text normalization for intent classification.
//!
//! A [`Normalizer`] runs the English analyzer over raw text and joins the
//! surviving tokens with single spaces. The same normalizer must be used for
//! training patterns and for user input.
//!
//! # Examples
//!
//! ```
//! use palaver::analysis::normalizer::Normalizer;
//!
//! let normalizer = Normalizer::english().unwrap();
//!
//! assert_eq!(normalizer.normalize("Tell me some jokes!"), "tell joke");
//! assert_eq!(normalizer.normalize("How are you?"), "");
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::english::EnglishAnalyzer;
use crate::analysis::token_filter::lemma::HashMapLemmatizer;
use crate::analysis::token_filter::stop::StopFilter;
use crate::config::AnalysisConfig;
use crate::error::Result;

/// Converts raw text into a space-joined sequence of normalized tokens.
///
/// Normalization is a pure function of its input: it holds no mutable state
/// and can be shared across threads.
#[derive(Clone)]
pub struct Normalizer {
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl Normalizer {
    /// Normalizer with the bundled English stop words and lexicon.
    pub fn english() -> Result<Self> {
        Ok(Self::with_analyzer(Arc::new(EnglishAnalyzer::new()?)))
    }

    /// Normalizer built from configured resources.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        let stop_filter = match &config.stop_words {
            Some(words) => StopFilter::from_words(words.iter().map(String::as_str)),
            None => StopFilter::new(),
        };
        let lemmatizer = match &config.lemma_lexicon {
            Some(path) => Arc::new(HashMapLemmatizer::from_path(path)?),
            None => HashMapLemmatizer::english(),
        };

        let analyzer = EnglishAnalyzer::with_resources(stop_filter, lemmatizer)?;
        Ok(Self::with_analyzer(Arc::new(analyzer)))
    }

    /// Normalizer over any analyzer.
    pub fn with_analyzer(analyzer: Arc<dyn Analyzer>) -> Self {
        Self { analyzer }
    }

    /// Normalize text. Returns the empty string when no token survives.
    pub fn normalize(&self, text: &str) -> String {
        let tokens: Vec<String> = self.analyzer.analyze(text).map(|token| token.text).collect();
        tokens.join(" ")
    }

    /// Name of the underlying analyzer.
    pub fn analyzer_name(&self) -> &'static str {
        self.analyzer.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_normalize() {
        let normalizer = Normalizer::english().unwrap();

        assert_eq!(normalizer.normalize("Hello there!"), "hello");
        assert_eq!(
            normalizer.normalize("What are you doing this weekend"),
            "weekend"
        );
        assert_eq!(normalizer.normalize("GOODBYE, friends"), "goodbye friend");
    }

    #[test]
    fn test_normalize_keeps_words_with_clitics() {
        let normalizer = Normalizer::english().unwrap();

        assert_eq!(normalizer.normalize("What's today's weather?"), "today weather");
        assert_eq!(normalizer.normalize("children's books"), "child book");
        assert_eq!(normalizer.normalize("John's birthday party"), "john birthday party");
        assert_eq!(normalizer.normalize("It's 3.5 degrees"), "3 5 degree");
        assert_eq!(normalizer.normalize("I'm sure you're right, don't worry"), "sure right worry");
    }

    #[test]
    fn test_normalize_edge_cases() {
        let normalizer = Normalizer::english().unwrap();

        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize("???"), "");
        assert_eq!(normalizer.normalize("the a an"), "");
        assert_eq!(normalizer.normalize("🙂 🎉"), "");
        assert_eq!(normalizer.normalize("  \t\n "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let normalizer = Normalizer::english().unwrap();

        for text in [
            "Can you recommend some good books?",
            "I went running with the children",
            "Héllo Wörld, Straße!",
            "日本語のテキスト",
        ] {
            let once = normalizer.normalize(text);
            assert_eq!(normalizer.normalize(&once), once, "input: {text}");
        }
    }

    #[test]
    fn test_from_config_custom_stop_words() {
        let config = AnalysisConfig {
            stop_words: Some(vec!["Hello".to_string()]),
            lemma_lexicon: None,
        };

        let normalizer = Normalizer::from_config(&config).unwrap();

        assert_eq!(normalizer.normalize("hello the world"), "the world");
        assert_eq!(normalizer.analyzer_name(), "english");
    }

    #[test]
    fn test_from_config_custom_lexicon() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cat,cats,kitty").unwrap();

        let config = AnalysisConfig {
            stop_words: None,
            lemma_lexicon: Some(file.path().to_path_buf()),
        };
        let normalizer = Normalizer::from_config(&config).unwrap();

        assert_eq!(normalizer.normalize("Kitty and cats"), "cat cat");
        assert_eq!(normalizer.normalize("jokes"), "jokes");
    }

    #[test]
    fn test_from_config_missing_lexicon() {
        let config = AnalysisConfig {
            stop_words: None,
            lemma_lexicon: Some("/nonexistent/lexicon.csv".into()),
        };

        assert!(Normalizer::from_config(&config).is_err());
    }
}
