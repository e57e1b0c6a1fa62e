//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of the normalization pipeline. They split
//! raw input into word tokens and never fail: any string, including the empty
//! string, yields a (possibly empty) token stream.
//!
//! # Examples
//!
//! ```
//! use palaver::analysis::tokenizer::Tokenizer;
//! use palaver::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
//!
//! let tokenizer = UnicodeWordTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world!").collect();
//! assert_eq!(tokens.len(), 4);
//! ```

use crate::analysis::token::TokenStream;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so that a fitted model can be shared
/// across threads.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> TokenStream;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod unicode_word;
