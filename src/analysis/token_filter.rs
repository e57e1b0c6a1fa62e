//! Token filter implementations for token transformation.
//!
//! Filters receive the token stream produced by a tokenizer and return a new
//! stream with tokens rewritten or removed. The normalizer chains them as:
//!
//! ```text
//! Tokenizer → Lowercase → Alphanumeric → Stop Words → Lemma
//! ```
//!
//! # Examples
//!
//! ```
//! use palaver::analysis::token::Token;
//! use palaver::analysis::token_filter::Filter;
//! use palaver::analysis::token_filter::lowercase::LowercaseFilter;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello"), Token::new("WORLD")];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter())).collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;

/// Trait for filters that transform token streams.
///
/// Filters are total: they accept any token stream and never fail.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> TokenStream;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod alphanumeric;
pub mod lemma;
pub mod lowercase;
pub mod stop;
