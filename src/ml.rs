//! Machine learning components of the chatbot.

pub mod intent_classifier;
