//! Intent classifier using TF-IDF n-gram features and logistic regression.

use crate::analysis::normalizer::Normalizer;

use super::classifier::IntentClassifier;
use super::logreg::MultinomialLogisticRegression;
use super::tfidf::{FeatureVector, Vocabulary};
use super::types::{IntentPrediction, TrainingStats};

/// A fitted intent model: normalizer, vocabulary and regression weights.
///
/// Built once by [`train`](super::train) and read-only afterwards, so one
/// instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct LogisticIntentClassifier {
    normalizer: Normalizer,
    vocabulary: Vocabulary,
    regression: MultinomialLogisticRegression,
}

impl LogisticIntentClassifier {
    pub fn new(
        normalizer: Normalizer,
        vocabulary: Vocabulary,
        regression: MultinomialLogisticRegression,
    ) -> Self {
        Self {
            normalizer,
            vocabulary,
            regression,
        }
    }

    /// Normalize and vectorize raw text.
    pub fn features(&self, text: &str) -> FeatureVector {
        self.vocabulary.transform(&self.normalizer.normalize(text))
    }

    /// Probability of every label, in [`labels`](IntentClassifier::labels) order.
    pub fn predict_proba(&self, text: &str) -> Vec<f64> {
        self.regression.predict_proba(&self.features(text))
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn regression(&self) -> &MultinomialLogisticRegression {
        &self.regression
    }

    pub fn stats(&self) -> &TrainingStats {
        self.regression.stats()
    }
}

impl IntentClassifier for LogisticIntentClassifier {
    fn predict(&self, text: &str) -> IntentPrediction {
        let features = self.features(text);
        let (index, probability) = self.regression.predict(&features);
        let tag = self.regression.classes()[index].clone();

        log::debug!(
            "classified {text:?} as '{tag}' (p = {probability:.3}, {} known n-grams)",
            features.nnz()
        );

        IntentPrediction {
            index,
            tag,
            probability,
        }
    }

    fn labels(&self) -> &[String] {
        self.regression.classes()
    }

    fn name(&self) -> &str {
        "logistic_regression"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PalaverConfig;
    use crate::corpus::{Intent, IntentCorpus};
    use crate::ml::intent_classifier::train;

    fn small_talk() -> IntentCorpus {
        IntentCorpus::new(vec![
            Intent::new(
                "greeting",
                ["Hi", "Hello there", "Hey, how are you?", "Good morning"],
                ["Hello!"],
            ),
            Intent::new(
                "joke",
                ["Tell me a joke", "Make me laugh", "Do you know any jokes?"],
                ["Why did the chicken cross the road?"],
            ),
            Intent::new(
                "weather",
                ["What's the weather like?", "Is it going to rain today?", "Weather forecast"],
                ["I cannot check the weather, sorry."],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_logistic_intent_classifier() {
        let classifier = train(&small_talk(), &PalaverConfig::default()).unwrap();

        assert_eq!(classifier.predict("hello!").tag, "greeting");
        assert_eq!(classifier.predict("tell me some jokes").tag, "joke");
        assert_eq!(classifier.predict("is it going to rain tomorrow").tag, "weather");
        assert_eq!(classifier.name(), "logistic_regression");
        assert_eq!(classifier.labels(), &["greeting", "joke", "weather"]);
    }

    #[test]
    fn test_prediction_matches_probabilities() {
        let classifier = train(&small_talk(), &PalaverConfig::default()).unwrap();

        let prediction = classifier.predict("weather forecast please");
        let probabilities = classifier.predict_proba("weather forecast please");

        assert_eq!(prediction.index, 2);
        assert_eq!(prediction.probability, probabilities[2]);
        assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_always_predicts_a_label() {
        let classifier = train(&small_talk(), &PalaverConfig::default()).unwrap();

        for text in ["", "???", "🦀🦀", "xyzzy plugh", "的的的"] {
            let prediction = classifier.predict(text);
            assert!(classifier.labels().contains(&prediction.tag));
        }
        assert!(classifier.features("").is_zero());
    }
}
