//! Intent classification with TF-IDF features and logistic regression.
//!
//! # Architecture
//!
//! - `IntentClassifier` trait: common interface for classifiers
//! - `TfIdfVectorizer` / `Vocabulary`: word n-gram feature extraction
//! - `MultinomialLogisticRegression`: softmax classifier over sparse features
//! - `LogisticIntentClassifier`: the fitted model (normalizer + vocabulary + weights)
//! - `train` / `evaluate`: fit on a corpus, measure self-consistency
//!
//! # Example
//!
//! ```
//! use palaver::config::PalaverConfig;
//! use palaver::corpus::{Intent, IntentCorpus};
//! use palaver::ml::intent_classifier::{self, IntentClassifier};
//!
//! let corpus = IntentCorpus::new(vec![
//!     Intent::new("greeting", ["Hi", "Hello"], ["Hello!"]),
//!     Intent::new("farewell", ["Bye", "Goodbye"], ["Goodbye!"]),
//! ])
//! .unwrap();
//!
//! let classifier = intent_classifier::train(&corpus, &PalaverConfig::default()).unwrap();
//! assert_eq!(classifier.predict("hello").tag, "greeting");
//! ```

mod classifier;
mod core;
mod logreg;
mod ml_classifier;
mod tfidf;
mod types;

// Public exports
pub use classifier::IntentClassifier;
pub use self::core::{Evaluation, Misclassification, evaluate, train, training_examples};
pub use logreg::MultinomialLogisticRegression;
pub use ml_classifier::LogisticIntentClassifier;
pub use tfidf::{FeatureVector, TfIdfVectorizer, Vocabulary};
pub use types::{IntentPrediction, TrainingExample, TrainingStats};
