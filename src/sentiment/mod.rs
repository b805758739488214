//! Sentiment labels and the classifier boundary.
//!
//! The conversation core only ever sees a [`Sentiment`]; how the label is
//! produced is hidden behind the [`Classifier`] trait so backends can be swapped
//! without touching intensity resolution or response selection.
//!
//! Two backends ship with the crate:
//!
//! - [`LexiconClassifier`]: keyword heuristic, no model file required.
//! - [`NaiveBayesClassifier`]: exported TF-IDF + multinomial naive Bayes model.

pub mod lexicon;
pub mod naive_bayes;

pub use lexicon::LexiconClassifier;
pub use naive_bayes::NaiveBayesClassifier;

use crate::config::{ClassifierBackend, ClassifierConfig};
use crate::error::{ChatError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Emotional polarity of a single utterance.
///
/// Persisted as its integer code: `0` negative, `1` positive, `2` neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Sentiment {
    Negative,
    Positive,
    Neutral,
}

impl Sentiment {
    /// All labels, in code order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Negative, Sentiment::Positive, Sentiment::Neutral];

    /// Integer code used on disk and by exported models.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Sentiment::Negative => 0,
            Sentiment::Positive => 1,
            Sentiment::Neutral => 2,
        }
    }

    /// Inverse of [`Sentiment::code`].
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Sentiment::Negative),
            1 => Some(Sentiment::Positive),
            2 => Some(Sentiment::Neutral),
            _ => None,
        }
    }

    /// Lowercase name, also the section key in response override files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Sentiment> for u8 {
    fn from(value: Sentiment) -> Self {
        value.code()
    }
}

impl TryFrom<u8> for Sentiment {
    type Error = String;

    fn try_from(code: u8) -> std::result::Result<Self, Self::Error> {
        Sentiment::from_code(code).ok_or_else(|| format!("unknown sentiment code {code}"))
    }
}

/// Maps an utterance to a sentiment label.
///
/// Implementations must be deterministic for a given loaded model.
pub trait Classifier: Send + Sync {
    /// Classify one utterance.
    fn classify(&self, utterance: &str) -> Sentiment;
}

/// Build the classifier selected in config.
///
/// # Errors
///
/// Returns [`ChatError::Classifier`] when the naive Bayes backend is selected
/// without a model path, or when the model file cannot be loaded.
pub fn build_classifier(config: &ClassifierConfig) -> Result<Box<dyn Classifier>> {
    match config.backend {
        ClassifierBackend::Lexicon => {
            info!("using lexicon sentiment classifier");
            Ok(Box::new(LexiconClassifier::new()))
        }
        ClassifierBackend::NaiveBayes => {
            let path = config.model_path.as_deref().ok_or_else(|| {
                ChatError::Classifier("naive_bayes backend requires classifier.model_path".into())
            })?;
            let model = NaiveBayesClassifier::from_file(path)?;
            info!(
                path = %path.display(),
                vocabulary = model.vocabulary_len(),
                "loaded naive Bayes sentiment model"
            );
            Ok(Box::new(model))
        }
    }
}
