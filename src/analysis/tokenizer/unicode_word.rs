//! Unicode word tokenizer implementation.
//!
//! Splits text on Unicode word boundaries (UAX #29). Whitespace segments are
//! skipped; every other segment becomes a token, so punctuation shows up as
//! its own token and is left for
//! [`AlphanumericFilter`](crate::analysis::token_filter::alphanumeric::AlphanumericFilter)
//! to discard.
//!
//! UAX #29 keeps apostrophes, periods and commas inside a word (`today's`,
//! `3.5`, `example.com`). Those separators are split out as tokens of their
//! own, so `today's` yields `today`, `'` and `s`.
//!
//! # Examples
//!
//! ```
//! use palaver::analysis::tokenizer::Tokenizer;
//! use palaver::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
//!
//! let tokenizer = UnicodeWordTokenizer::new();
//! let texts: Vec<String> = tokenizer
//!     .tokenize("What's up, world!")
//!     .map(|token| token.text)
//!     .collect();
//!
//! assert_eq!(texts, ["What", "'", "s", "up", ",", "world", "!"]);
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;

/// A tokenizer that splits text on Unicode word boundaries.
#[derive(Clone, Debug, Default)]
pub struct UnicodeWordTokenizer;

impl UnicodeWordTokenizer {
    /// Create a new Unicode word tokenizer.
    pub fn new() -> Self {
        UnicodeWordTokenizer
    }

    /// Characters UAX #29 allows inside a word segment that still separate words.
    fn is_word_separator(c: char) -> bool {
        matches!(
            c,
            '\'' | '\u{2018}' | '\u{2019}' | '\u{02BC}' | '.' | ',' | ':' | ';' | '\u{00B7}' | '_'
        )
    }

    /// Split one word segment at its internal separators, keeping the separators.
    fn split_segment<'a>(segment: &'a str, pieces: &mut Vec<&'a str>) {
        let mut start = 0;
        for (i, c) in segment.char_indices() {
            if Self::is_word_separator(c) {
                if start < i {
                    pieces.push(&segment[start..i]);
                }
                let end = i + c.len_utf8();
                pieces.push(&segment[i..end]);
                start = end;
            }
        }
        if start < segment.len() {
            pieces.push(&segment[start..]);
        }
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> TokenStream {
        let mut pieces = Vec::new();
        for segment in text.split_word_bounds() {
            if !segment.chars().all(char::is_whitespace) {
                Self::split_segment(segment, &mut pieces);
            }
        }

        let tokens: Vec<Token> = pieces.into_iter().map(Token::new).collect();
        Box::new(tokens.into_iter())
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}
