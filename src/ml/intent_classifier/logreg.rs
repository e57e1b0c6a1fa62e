//! Multinomial (softmax) logistic regression over sparse features.
//!
//! Fitting minimizes the averaged regularized negative log-likelihood
//!
//! ```text
//! f(W, b) = 1/n Σ_i -ln softmax(W x_i + b)[y_i] + λ/2 ‖W‖²,   λ = 1 / (C n)
//! ```
//!
//! which has the same minimizer as `0.5 ‖W‖² + C Σ_i NLL_i`. Intercepts are
//! not penalized. The optimizer is Nesterov's accelerated gradient descent
//! for strongly convex objectives, started from zero, with the step set from
//! the Lipschitz bound of the gradient. It stops when every gradient
//! component is below the tolerance or when the iteration budget is spent.

use crate::config::LogisticRegressionConfig;
use crate::error::{PalaverError, Result};
use crate::ml::intent_classifier::tfidf::FeatureVector;
use crate::ml::intent_classifier::types::TrainingStats;

/// Fitted multinomial logistic regression.
#[derive(Debug, Clone)]
pub struct MultinomialLogisticRegression {
    /// Class labels, sorted lexically.
    classes: Vec<String>,
    /// Feature space dimension.
    dimension: usize,
    /// Row-major `classes × dimension` weights followed by one intercept per class.
    parameters: Vec<f64>,
    stats: TrainingStats,
}

impl MultinomialLogisticRegression {
    /// Fit the model on feature vectors and their labels.
    ///
    /// Fails when inputs are empty or mismatched, or when fewer than two
    /// distinct labels are present.
    pub fn fit(
        features: &[FeatureVector],
        labels: &[String],
        config: &LogisticRegressionConfig,
    ) -> Result<Self> {
        config.validate()?;
        if features.is_empty() {
            return Err(PalaverError::training("no training examples"));
        }
        if features.len() != labels.len() {
            return Err(PalaverError::training(format!(
                "{} feature vectors but {} labels",
                features.len(),
                labels.len()
            )));
        }
        let dimension = features[0].dimension();
        if features.iter().any(|x| x.dimension() != dimension) {
            return Err(PalaverError::training(
                "feature vectors have different dimensions",
            ));
        }

        let mut classes: Vec<String> = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();
        if classes.len() < 2 {
            return Err(PalaverError::training(format!(
                "need at least 2 distinct intent tags, found {}",
                classes.len()
            )));
        }

        // Every label is in `classes` by construction.
        let targets: Vec<usize> = labels
            .iter()
            .map(|label| classes.binary_search(label).unwrap_or_default())
            .collect();

        let problem = Problem {
            features,
            targets: &targets,
            n_classes: classes.len(),
            dimension,
            lambda: 1.0 / (config.c * features.len() as f64),
        };
        let (parameters, stats) = problem.minimize(config);

        if stats.converged {
            log::debug!(
                "logistic regression converged after {} iterations (loss {:.6})",
                stats.iterations,
                stats.final_loss
            );
        } else {
            log::warn!(
                "logistic regression did not converge within {} iterations (loss {:.6}); \
                 consider raising max_iterations",
                stats.iterations,
                stats.final_loss
            );
        }

        Ok(Self {
            classes,
            dimension,
            parameters,
            stats,
        })
    }

    /// Class labels in lexical order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    /// Weight row of a class.
    pub fn weights(&self, class: usize) -> &[f64] {
        &self.parameters[class * self.dimension..(class + 1) * self.dimension]
    }

    pub fn intercepts(&self) -> &[f64] {
        &self.parameters[self.classes.len() * self.dimension..]
    }

    /// Linear score of every class.
    pub fn decision_function(&self, x: &FeatureVector) -> Vec<f64> {
        scores(&self.parameters, x, self.classes.len(), self.dimension)
    }

    /// Softmax probability of every class.
    pub fn predict_proba(&self, x: &FeatureVector) -> Vec<f64> {
        let mut scores = self.decision_function(x);
        softmax_in_place(&mut scores);
        scores
    }

    /// Most probable class and its probability. Ties go to the lexically
    /// first class.
    pub fn predict(&self, x: &FeatureVector) -> (usize, f64) {
        let probabilities = self.predict_proba(x);
        let best = argmax(&probabilities);
        (best, probabilities[best])
    }
}

struct Problem<'a> {
    features: &'a [FeatureVector],
    targets: &'a [usize],
    n_classes: usize,
    dimension: usize,
    lambda: f64,
}

impl Problem<'_> {
    fn n_parameters(&self) -> usize {
        self.n_classes * (self.dimension + 1)
    }

    /// Objective value and gradient at `parameters`.
    fn loss_and_gradient(&self, parameters: &[f64], gradient: &mut [f64]) -> f64 {
        let (k, d) = (self.n_classes, self.dimension);
        let n = self.features.len() as f64;
        let weights = &parameters[..k * d];

        for (g, w) in gradient[..k * d].iter_mut().zip(weights) {
            *g = self.lambda * w;
        }
        gradient[k * d..].fill(0.0);

        let mut nll = 0.0;
        for (x, &target) in self.features.iter().zip(self.targets) {
            let mut probabilities = scores(parameters, x, k, d);
            let log_normalizer = log_sum_exp(&probabilities);
            nll += log_normalizer - probabilities[target];
            for p in probabilities.iter_mut() {
                *p = (*p - log_normalizer).exp();
            }

            for (class, p) in probabilities.iter().enumerate() {
                let residual = (p - if class == target { 1.0 } else { 0.0 }) / n;
                for &(j, v) in x.entries() {
                    gradient[class * d + j] += residual * v;
                }
                gradient[k * d + class] += residual;
            }
        }

        let penalty: f64 = weights.iter().map(|w| w * w).sum();
        nll / n + 0.5 * self.lambda * penalty
    }

    fn minimize(&self, config: &LogisticRegressionConfig) -> (Vec<f64>, TrainingStats) {
        let max_squared_norm = self
            .features
            .iter()
            .map(|x| x.squared_norm() + 1.0)
            .fold(0.0, f64::max);
        let lipschitz = 0.5 * max_squared_norm + self.lambda;
        let step = 1.0 / lipschitz;
        let momentum = {
            let (l, mu) = (lipschitz.sqrt(), self.lambda.sqrt());
            (l - mu) / (l + mu)
        };

        let size = self.n_parameters();
        let mut current = vec![0.0; size];
        let mut lookahead = vec![0.0; size];
        let mut gradient = vec![0.0; size];
        let mut next = vec![0.0; size];
        let mut converged = false;
        let mut iterations = 0;

        while iterations < config.max_iterations {
            iterations += 1;
            self.loss_and_gradient(&lookahead, &mut gradient);
            if max_abs(&gradient) < config.tolerance {
                current.copy_from_slice(&lookahead);
                converged = true;
                break;
            }

            for i in 0..size {
                next[i] = lookahead[i] - step * gradient[i];
                lookahead[i] = next[i] + momentum * (next[i] - current[i]);
            }
            std::mem::swap(&mut current, &mut next);
        }

        let final_loss = self.loss_and_gradient(&current, &mut gradient);
        let stats = TrainingStats {
            examples: self.features.len(),
            iterations,
            final_loss,
            converged,
        };
        (current, stats)
    }
}

fn scores(parameters: &[f64], x: &FeatureVector, n_classes: usize, dimension: usize) -> Vec<f64> {
    let intercepts = &parameters[n_classes * dimension..];
    (0..n_classes)
        .map(|class| {
            let row = &parameters[class * dimension..(class + 1) * dimension];
            intercepts[class] + x.dot(row)
        })
        .collect()
}

fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}

fn softmax_in_place(values: &mut [f64]) {
    let log_normalizer = log_sum_exp(values);
    for v in values.iter_mut() {
        *v = (*v - log_normalizer).exp();
    }
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc.max(v.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::intent_classifier::tfidf::TfIdfVectorizer;

    fn dataset(pairs: &[(&str, &str)]) -> (Vec<FeatureVector>, Vec<String>) {
        let documents: Vec<String> = pairs.iter().map(|(d, _)| d.to_string()).collect();
        let labels = pairs.iter().map(|(_, l)| l.to_string()).collect();
        let vocabulary = TfIdfVectorizer::default().fit(&documents).unwrap();
        (vocabulary.transform_all(&documents), labels)
    }

    #[test]
    fn test_fit_separable_data() {
        let (features, labels) = dataset(&[
            ("hi", "greeting"),
            ("hello", "greeting"),
            ("bye", "farewell"),
            ("goodbye", "farewell"),
        ]);

        let model =
            MultinomialLogisticRegression::fit(&features, &labels, &Default::default()).unwrap();

        assert_eq!(model.classes(), &["farewell", "greeting"]);
        for (x, label) in features.iter().zip(&labels) {
            let (class, probability) = model.predict(x);
            assert_eq!(&model.classes()[class], label);
            assert!(probability > 0.5);
        }
        assert!(model.stats().converged);
        assert_eq!(model.stats().examples, 4);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (features, labels) = dataset(&[
            ("tell joke", "joke"),
            ("funny joke", "joke"),
            ("weather today", "weather"),
            ("rain today", "weather"),
            ("thank", "thanks"),
        ]);
        let model =
            MultinomialLogisticRegression::fit(&features, &labels, &Default::default()).unwrap();

        let probabilities = model.predict_proba(&features[0]);

        assert_eq!(probabilities.len(), 3);
        assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(probabilities.iter().all(|&p| p > 0.0 && p < 1.0));
    }

    #[test]
    fn test_zero_vector_uses_intercepts() {
        let (features, labels) = dataset(&[
            ("hi", "greeting"),
            ("hello", "greeting"),
            ("hey", "greeting"),
            ("bye", "farewell"),
        ]);
        let model =
            MultinomialLogisticRegression::fit(&features, &labels, &Default::default()).unwrap();

        let (class, _) = model.predict(&FeatureVector::zeros(model.dimension()));

        assert_eq!(model.classes()[class], "greeting");
        assert!(model.intercepts()[1] > model.intercepts()[0]);
    }

    #[test]
    fn test_ties_go_to_first_class() {
        assert_eq!(argmax(&[0.5, 0.5]), 0);
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), 1);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (features, labels) = dataset(&[
            ("tell joke", "joke"),
            ("weather today", "weather"),
            ("joke today", "joke"),
        ]);
        let config = LogisticRegressionConfig::default();

        let first = MultinomialLogisticRegression::fit(&features, &labels, &config).unwrap();
        let second = MultinomialLogisticRegression::fit(&features, &labels, &config).unwrap();

        assert_eq!(first.parameters, second.parameters);
    }

    #[test]
    fn test_rejects_single_class() {
        let (features, labels) = dataset(&[("hi", "greeting"), ("hello", "greeting")]);

        let err = MultinomialLogisticRegression::fit(&features, &labels, &Default::default())
            .unwrap_err();

        assert!(matches!(err, PalaverError::Training(_)));
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_rejects_mismatched_inputs() {
        let (features, mut labels) = dataset(&[("hi", "greeting"), ("bye", "farewell")]);
        labels.pop();

        assert!(
            MultinomialLogisticRegression::fit(&features, &labels, &Default::default()).is_err()
        );
        assert!(MultinomialLogisticRegression::fit(&[], &[], &Default::default()).is_err());
    }

    #[test]
    fn test_iteration_budget() {
        let (features, labels) = dataset(&[("hi", "greeting"), ("bye", "farewell")]);
        let config = LogisticRegressionConfig {
            max_iterations: 1,
            ..Default::default()
        };

        let model = MultinomialLogisticRegression::fit(&features, &labels, &config).unwrap();

        assert_eq!(model.stats().iterations, 1);
        assert!(!model.stats().converged);
    }
}
