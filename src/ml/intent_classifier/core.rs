//! Training and evaluation entry points.

use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::normalizer::Normalizer;
use crate::config::PalaverConfig;
use crate::corpus::IntentCorpus;
use crate::error::Result;
use crate::ml::intent_classifier::classifier::IntentClassifier;
use crate::ml::intent_classifier::logreg::MultinomialLogisticRegression;
use crate::ml::intent_classifier::ml_classifier::LogisticIntentClassifier;
use crate::ml::intent_classifier::tfidf::TfIdfVectorizer;
use crate::ml::intent_classifier::types::TrainingExample;

/// Flatten the corpus into one normalized example per pattern.
pub fn training_examples(corpus: &IntentCorpus, normalizer: &Normalizer) -> Vec<TrainingExample> {
    let patterns: Vec<(&str, &str)> = corpus.patterns().collect();
    patterns
        .into_par_iter()
        .map(|(tag, pattern)| TrainingExample {
            text: normalizer.normalize(pattern),
            tag: tag.to_string(),
        })
        .collect()
}

/// Fit a model on every pattern of the corpus.
pub fn train(corpus: &IntentCorpus, config: &PalaverConfig) -> Result<LogisticIntentClassifier> {
    config.validate()?;
    let started = Instant::now();

    let normalizer = Normalizer::from_config(&config.analysis)?;
    let examples = training_examples(corpus, &normalizer);
    let (documents, tags): (Vec<String>, Vec<String>) = examples
        .into_iter()
        .map(|example| (example.text, example.tag))
        .unzip();

    let vocabulary = TfIdfVectorizer::new(config.features.clone()).fit(&documents)?;
    let features = vocabulary.transform_all(&documents);
    let regression = MultinomialLogisticRegression::fit(&features, &tags, &config.classifier)?;

    log::info!(
        "trained on {} patterns from {} intents: {} n-grams, {} iterations in {:?}",
        documents.len(),
        regression.classes().len(),
        vocabulary.len(),
        regression.stats().iterations,
        started.elapsed()
    );

    Ok(LogisticIntentClassifier::new(
        normalizer, vocabulary, regression,
    ))
}

/// A training pattern classified under another tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Misclassification {
    pub pattern: String,
    pub expected: String,
    pub predicted: String,
    pub probability: f64,
}

/// Training-set self-consistency of a classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub total: usize,
    pub correct: usize,
    pub misses: Vec<Misclassification>,
}

impl Evaluation {
    /// Fraction of patterns classified back to their own tag.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }
}

/// Classify every pattern of the corpus and compare with its tag.
pub fn evaluate(classifier: &dyn IntentClassifier, corpus: &IntentCorpus) -> Evaluation {
    let patterns: Vec<(&str, &str)> = corpus.patterns().collect();
    let misses: Vec<Misclassification> = patterns
        .par_iter()
        .filter_map(|&(tag, pattern)| {
            let prediction = classifier.predict(pattern);
            (prediction.tag != tag).then(|| Misclassification {
                pattern: pattern.to_string(),
                expected: tag.to_string(),
                predicted: prediction.tag,
                probability: prediction.probability,
            })
        })
        .collect();

    Evaluation {
        total: patterns.len(),
        correct: patterns.len() - misses.len(),
        misses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Intent;
    use crate::error::PalaverError;

    fn corpus() -> IntentCorpus {
        IntentCorpus::new(vec![
            Intent::new("greeting", ["Hi", "Hello"], ["Hello!"]),
            Intent::new("farewell", ["Bye", "Goodbye"], ["Goodbye!"]),
            Intent::new("thanks", ["Thanks a lot", "Thank you"], ["You're welcome!"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_training_examples() {
        let normalizer = Normalizer::english().unwrap();

        let examples = training_examples(&corpus(), &normalizer);

        assert_eq!(examples.len(), 6);
        assert_eq!(
            examples[0],
            TrainingExample {
                text: "hi".to_string(),
                tag: "greeting".to_string()
            }
        );
        assert_eq!(examples[4].text, "thank lot");
        assert_eq!(examples[5].text, "thank");
        assert_eq!(examples[5].tag, "thanks");
    }

    #[test]
    fn test_train_and_evaluate() {
        let corpus = corpus();
        let classifier = train(&corpus, &PalaverConfig::default()).unwrap();

        let evaluation = evaluate(&classifier, &corpus);

        assert_eq!(evaluation.total, 6);
        assert_eq!(evaluation.correct, 6);
        assert!(evaluation.misses.is_empty());
        assert_eq!(evaluation.accuracy(), 1.0);
        assert!(classifier.stats().converged);
    }

    #[test]
    fn test_train_rejects_single_intent() {
        let corpus = IntentCorpus::new(vec![Intent::new("greeting", ["hi"], ["Hello!"])]).unwrap();

        let result = train(&corpus, &PalaverConfig::default());

        assert!(matches!(result, Err(PalaverError::Training(_))));
    }

    #[test]
    fn test_train_rejects_empty_vocabulary() {
        let corpus = IntentCorpus::new(vec![
            Intent::new("a", ["the"], ["A"]),
            Intent::new("b", ["???"], ["B"]),
        ])
        .unwrap();

        assert!(matches!(
            train(&corpus, &PalaverConfig::default()),
            Err(PalaverError::Training(_))
        ));
    }

    #[test]
    fn test_train_rejects_invalid_config() {
        let mut config = PalaverConfig::default();
        config.features.max_ngram = 0;

        assert!(matches!(
            train(&corpus(), &config),
            Err(PalaverError::Config(_))
        ));
    }
}
