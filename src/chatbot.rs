//! The chatbot: a corpus paired with a fitted intent classifier.
//!
//! Inference is total: [`Chatbot::respond`] returns a response from the
//! corpus for every input string, including the empty string. All fallible
//! work happens in [`Chatbot::train`] and [`Chatbot::new`].

use chrono::{DateTime, Local};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::PalaverConfig;
use crate::corpus::{Intent, IntentCorpus};
use crate::error::{PalaverError, Result};
use crate::ml::intent_classifier::{self, IntentClassifier, IntentPrediction};
use crate::response::{SharedRng, choose_response};

/// Replies that end an interactive conversation.
const FAREWELL_REPLIES: &[&str] = &["goodbye", "bye"];

/// One user utterance and the reply it received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub user_text: String,
    pub reply_text: String,
    pub timestamp: DateTime<Local>,
}

/// Intent chatbot.
pub struct Chatbot {
    corpus: IntentCorpus,
    classifier: Box<dyn IntentClassifier>,
    /// Classifier label index -> corpus intent position.
    label_to_intent: Vec<usize>,
    rng: SharedRng,
}

impl std::fmt::Debug for Chatbot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chatbot")
            .field("intents", &self.corpus.len())
            .field("classifier", &self.classifier.name())
            .field("rng", &self.rng)
            .finish()
    }
}

impl Chatbot {
    /// Train a classifier on the corpus and build a chatbot around it.
    pub fn train(corpus: IntentCorpus, config: &PalaverConfig) -> Result<Self> {
        let classifier = intent_classifier::train(&corpus, config)?;
        Self::new(corpus, Box::new(classifier), SharedRng::from_seed(config.seed))
    }

    /// Pair a corpus with an already fitted classifier.
    ///
    /// Fails when the classifier knows a label that is not a corpus tag.
    pub fn new(
        corpus: IntentCorpus,
        classifier: Box<dyn IntentClassifier>,
        rng: SharedRng,
    ) -> Result<Self> {
        let label_to_intent = classifier
            .labels()
            .iter()
            .map(|label| {
                corpus.position(label).ok_or_else(|| {
                    PalaverError::unknown_intent(format!(
                        "classifier label '{label}' is not a corpus tag"
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Chatbot {
            corpus,
            classifier,
            label_to_intent,
            rng,
        })
    }

    pub fn corpus(&self) -> &IntentCorpus {
        &self.corpus
    }

    pub fn classifier(&self) -> &dyn IntentClassifier {
        self.classifier.as_ref()
    }

    /// Predict the intent of `text`.
    pub fn classify(&self, text: &str) -> IntentPrediction {
        self.classifier.predict(text)
    }

    /// Corpus intent of the predicted label.
    fn predicted_intent(&self, text: &str) -> &Intent {
        let prediction = self.classify(text);
        &self.corpus.intents()[self.label_to_intent[prediction.index]]
    }

    /// Reply to `text`, drawing the response with the given random source.
    pub fn respond_with<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> &str {
        choose_response(self.predicted_intent(text), rng).unwrap_or_default()
    }

    /// Reply to `text` using the chatbot's own random source.
    ///
    /// The random source is locked only for the draw, never during
    /// classification.
    pub fn respond(&self, text: &str) -> &str {
        let intent = self.predicted_intent(text);
        self.rng
            .with(|rng| choose_response(intent, rng))
            .unwrap_or_default()
    }

    /// Reply to `text` and record the exchange with the current local time.
    pub fn exchange(&self, text: &str) -> Exchange {
        let reply_text = self.respond(text).to_string();
        Exchange {
            user_text: text.to_string(),
            reply_text,
            timestamp: Local::now(),
        }
    }
}

/// Whether a reply ends the conversation.
pub fn is_farewell(reply: &str) -> bool {
    let reply = reply.trim().to_lowercase();
    FAREWELL_REPLIES.contains(&reply.as_str())
}
