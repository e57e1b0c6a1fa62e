//! Alphanumeric filter implementation.
//!
//! Drops tokenization artifacts: any token containing a character that is
//! neither alphabetic nor numeric (punctuation, symbols, emoji, apostrophes,
//! combining marks) is removed from the stream.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;

/// A filter that keeps only purely alphanumeric tokens.
///
/// # Examples
///
/// ```
/// use palaver::analysis::token::Token;
/// use palaver::analysis::token_filter::Filter;
/// use palaver::analysis::token_filter::alphanumeric::AlphanumericFilter;
///
/// let filter = AlphanumericFilter::new();
/// let tokens = vec![Token::new("hello"), Token::new("!"), Token::new("42")];
/// let kept: Vec<_> = filter.filter(Box::new(tokens.into_iter())).collect();
///
/// assert_eq!(kept.len(), 2);
/// assert_eq!(kept[1].text, "42");
/// ```
#[derive(Clone, Debug, Default)]
pub struct AlphanumericFilter;

impl AlphanumericFilter {
    /// Create a new alphanumeric filter.
    pub fn new() -> Self {
        AlphanumericFilter
    }

    /// Check whether a word survives this filter.
    pub fn is_alphanumeric(word: &str) -> bool {
        !word.is_empty() && word.chars().all(char::is_alphanumeric)
    }
}

impl Filter for AlphanumericFilter {
    fn filter(&self, tokens: TokenStream) -> TokenStream {
        Box::new(tokens.filter(|token| Self::is_alphanumeric(&token.text)))
    }

    fn name(&self) -> &'static str {
        "alphanumeric"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_alphanumeric_filter() {
        let filter = AlphanumericFilter::new();
        let tokens = vec![
            Token::new("what"),
            Token::new("'s"),
            Token::new("up"),
            Token::new("???"),
            Token::new("😀"),
            Token::new("don't"),
            Token::new("café"),
        ];

        let result: Vec<String> = filter
            .filter(Box::new(tokens.into_iter()))
            .map(|t| t.text)
            .collect();

        assert_eq!(result, vec!["what", "up", "café"]);
    }

    #[test]
    fn test_is_alphanumeric() {
        assert!(AlphanumericFilter::is_alphanumeric("abc123"));
        assert!(!AlphanumericFilter::is_alphanumeric(""));
        assert!(!AlphanumericFilter::is_alphanumeric("e-mail"));
    }
}
