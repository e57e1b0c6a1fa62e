//! # Palaver
//!
//! A small intent-classification chatbot.
//!
//! ## Pipeline
//!
//! - Normalize text: word tokenization, lowercasing, stop-word removal and
//!   lemmatization
//! - Extract TF-IDF weighted word n-gram features
//! - Classify with multinomial logistic regression
//! - Answer with a response drawn at random from the predicted intent
//!
//! ```
//! use palaver::chatbot::Chatbot;
//! use palaver::config::PalaverConfig;
//! use palaver::corpus::IntentCorpus;
//!
//! let corpus = IntentCorpus::from_json(r#"[
//!     {"tag": "greeting", "patterns": ["hi", "hello"], "responses": ["Hello!"]},
//!     {"tag": "farewell", "patterns": ["bye", "goodbye"], "responses": ["Goodbye!"]}
//! ]"#).unwrap();
//!
//! let mut config = PalaverConfig::default();
//! config.seed = Some(42);
//! let chatbot = Chatbot::train(corpus, &config).unwrap();
//!
//! assert_eq!(chatbot.respond("hello"), "Hello!");
//! assert_eq!(chatbot.respond("bye"), "Goodbye!");
//! ```

pub mod analysis;
pub mod chatbot;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod history;
pub mod ml;
pub mod response;

/// Crate version, reported by `palaver --version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
