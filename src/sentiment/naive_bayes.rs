//! Multinomial naive Bayes classifier over TF-IDF features.
//!
//! The model is trained offline and exported as JSON:
//!
//! ```json
//! {
//!   "classes": [0, 1, 2],
//!   "vocabulary": { "good": 0, "sad": 1 },
//!   "idf": [1.4, 1.7],
//!   "class_log_prior": [-1.1, -1.1, -1.1],
//!   "feature_log_prob": [[-2.3, -0.1], [-0.1, -2.3], [-0.7, -0.7]]
//! }
//! ```
//!
//! `classes` holds sentiment codes; row `i` of `feature_log_prob` belongs to
//! `classes[i]`. `idf` is optional: without it raw term counts are used.

use super::{Classifier, Sentiment};
use crate::error::{ChatError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ModelFile {
    classes: Vec<u8>,
    vocabulary: HashMap<String, usize>,
    #[serde(default)]
    idf: Option<Vec<f64>>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

/// Loaded naive Bayes sentiment model.
#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier {
    classes: Vec<Sentiment>,
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

impl NaiveBayesClassifier {
    /// Load and validate a model file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Io`] if the file cannot be read and
    /// [`ChatError::Classifier`] if it is not a well-formed model.
    pub fn from_file(path: &Path) -> Result<Self> {
        let body = std::fs::read_to_string(path)?;
        Self::from_json(&body)
    }

    /// Parse and validate a model from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Classifier`] on malformed JSON, unknown class codes,
    /// or inconsistent matrix shapes.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ModelFile = serde_json::from_str(json)
            .map_err(|e| ChatError::Classifier(format!("invalid model file: {e}")))?;

        if file.classes.is_empty() {
            return Err(ChatError::Classifier("model has no classes".into()));
        }
        let classes = file
            .classes
            .iter()
            .map(|&code| {
                Sentiment::from_code(code)
                    .ok_or_else(|| ChatError::Classifier(format!("unknown class code {code}")))
            })
            .collect::<Result<Vec<_>>>()?;

        let n_features = file.vocabulary.len();
        if let Some((term, &index)) = file.vocabulary.iter().find(|(_, i)| **i >= n_features) {
            return Err(ChatError::Classifier(format!(
                "vocabulary index {index} for '{term}' out of range ({n_features} features)"
            )));
        }
        if file.class_log_prior.len() != classes.len() {
            return Err(ChatError::Classifier(format!(
                "class_log_prior has {} entries, expected {}",
                file.class_log_prior.len(),
                classes.len()
            )));
        }
        if file.feature_log_prob.len() != classes.len() {
            return Err(ChatError::Classifier(format!(
                "feature_log_prob has {} rows, expected {}",
                file.feature_log_prob.len(),
                classes.len()
            )));
        }
        if let Some(row) = file.feature_log_prob.iter().find(|r| r.len() != n_features) {
            return Err(ChatError::Classifier(format!(
                "feature_log_prob row has {} columns, expected {n_features}",
                row.len()
            )));
        }
        if let Some(idf) = &file.idf {
            if idf.len() != n_features {
                return Err(ChatError::Classifier(format!(
                    "idf has {} entries, expected {n_features}",
                    idf.len()
                )));
            }
        }

        Ok(Self {
            classes,
            vocabulary: file.vocabulary,
            idf: file.idf,
            class_log_prior: file.class_log_prior,
            feature_log_prob: file.feature_log_prob,
        })
    }

    /// Number of terms in the model vocabulary.
    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Sparse TF-IDF feature vector `(feature index, weight)`, L2-normalized.
    fn features(&self, utterance: &str) -> Vec<(usize, f64)> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokenize(utterance) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut weights: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, count)| {
                let idf = self.idf.as_ref().map_or(1.0, |idf| idf[index]);
                (index, count * idf)
            })
            .collect();

        let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut weights {
                *w /= norm;
            }
        }
        weights
    }
}

impl Classifier for NaiveBayesClassifier {
    fn classify(&self, utterance: &str) -> Sentiment {
        let features = self.features(utterance);

        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (class, prior) in self.class_log_prior.iter().enumerate() {
            let row = &self.feature_log_prob[class];
            let score = prior + features.iter().map(|&(i, w)| w * row[i]).sum::<f64>();
            if score > best_score {
                best_score = score;
                best = class;
            }
        }
        self.classes[best]
    }
}

/// Lowercased word tokens of at least two word characters.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| w.chars().count() >= 2)
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    const MODEL: &str = r#"{
        "classes": [0, 1, 2],
        "vocabulary": { "good": 0, "sad": 1, "weather": 2 },
        "idf": [1.0, 1.0, 1.0],
        "class_log_prior": [-1.0986, -1.0986, -1.0986],
        "feature_log_prob": [
            [-3.0, -0.2, -2.0],
            [-0.2, -3.0, -2.0],
            [-2.0, -2.0, -0.3]
        ]
    }"#;

    #[test]
    fn classifies_by_highest_joint_likelihood() {
        let model = NaiveBayesClassifier::from_json(MODEL).unwrap();
        assert_eq!(model.vocabulary_len(), 3);
        assert_eq!(model.classify("I feel good"), Sentiment::Positive);
        assert_eq!(model.classify("so SAD"), Sentiment::Negative);
        assert_eq!(model.classify("the weather"), Sentiment::Neutral);
    }

    #[test]
    fn unknown_words_fall_back_to_priors() {
        let json = MODEL.replace("[-1.0986, -1.0986, -1.0986]", "[-2.0, -0.5, -1.5]");
        let model = NaiveBayesClassifier::from_json(&json).unwrap();
        assert_eq!(model.classify("xyz qwerty"), Sentiment::Positive);
    }

    #[test]
    fn single_character_tokens_are_ignored() {
        let tokens: Vec<String> = tokenize("I a good-day X").collect();
        assert_eq!(tokens, ["good", "day"]);
    }

    #[test]
    fn model_without_idf_uses_raw_counts() {
        let json = MODEL.replace("\"idf\": [1.0, 1.0, 1.0],", "");
        let model = NaiveBayesClassifier::from_json(&json).unwrap();
        assert_eq!(model.classify("good good sad"), Sentiment::Positive);
    }

    #[test]
    fn rejects_unknown_class_code() {
        let json = MODEL.replace("[0, 1, 2]", "[0, 1, 5]");
        let err = NaiveBayesClassifier::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("unknown class code 5"), "{err}");
    }

    #[test]
    fn rejects_shape_mismatch() {
        let json = MODEL.replace("[-2.0, -2.0, -0.3]", "[-2.0, -0.3]");
        assert!(matches!(
            NaiveBayesClassifier::from_json(&json),
            Err(ChatError::Classifier(_))
        ));

        let json = MODEL.replace("\"idf\": [1.0, 1.0, 1.0]", "\"idf\": [1.0]");
        assert!(NaiveBayesClassifier::from_json(&json).is_err());
    }

    #[test]
    fn rejects_out_of_range_vocabulary_index() {
        let json = MODEL.replace("\"weather\": 2", "\"weather\": 9");
        assert!(NaiveBayesClassifier::from_json(&json).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            NaiveBayesClassifier::from_json("{not json"),
            Err(ChatError::Classifier(_))
        ));
    }

    #[test]
    fn from_file_reads_model() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("model.json");
        std::fs::write(&path, MODEL).unwrap();
        let model = NaiveBayesClassifier::from_file(&path).unwrap();
        assert_eq!(model.classify("good"), Sentiment::Positive);

        assert!(matches!(
            NaiveBayesClassifier::from_file(&dir.path().join("missing.json")),
            Err(ChatError::Io(_))
        ));
    }
}
