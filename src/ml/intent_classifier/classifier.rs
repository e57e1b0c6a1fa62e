//! Intent classifier trait definition.

use crate::ml::intent_classifier::types::IntentPrediction;

/// Intent classifier trait.
///
/// A classifier maps raw user text to exactly one of its labels. There is no
/// rejection outcome: out-of-domain text still receives the closest label.
pub trait IntentClassifier: Send + Sync {
    /// Predict the intent for the given text.
    ///
    /// Total over strings, including the empty string.
    fn predict(&self, text: &str) -> IntentPrediction;

    /// Labels the classifier can return, in the order used by
    /// [`IntentPrediction::index`].
    fn labels(&self) -> &[String];

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
