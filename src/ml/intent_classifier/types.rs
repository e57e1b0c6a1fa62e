//! Common types for intent classification.

use serde::{Deserialize, Serialize};

/// A normalized training pattern and the tag of the intent it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    /// Normalized pattern text.
    pub text: String,
    /// Intent tag.
    pub tag: String,
}

/// The single intent chosen for an utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentPrediction {
    /// Position of the tag in the classifier's label list.
    pub index: usize,
    /// Predicted intent tag.
    pub tag: String,
    /// Softmax probability of the tag.
    pub probability: f64,
}

/// Statistics recorded while fitting a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Number of training examples.
    pub examples: usize,
    /// Optimizer iterations performed.
    pub iterations: usize,
    /// Regularized objective at the returned parameters.
    pub final_loss: f64,
    /// Whether the gradient tolerance was met before the iteration budget ran out.
    pub converged: bool,
}
