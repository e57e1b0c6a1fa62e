//! Text analysis: tokenization, token filters, analyzers and normalization.
//!
//! ```text
//! raw text → Tokenizer → Filter … Filter → tokens → Normalizer → "a b c"
//! ```

pub mod analyzer;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
