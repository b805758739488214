//! Keyword-heuristic sentiment classifier.
//!
//! Scans the utterance word by word against positive and negative keyword
//! tables. A keyword directly preceded by a negator (`not`, `never`, `don't`...)
//! counts for the opposite polarity, so "not happy" reads as negative and
//! "not bad" as positive. The polarity with more hits wins; ties (including no
//! hits at all) are neutral.

use super::{Classifier, Sentiment};

// ── Keyword tables ──────────────────────────────────────────────────────

const POSITIVE_WORDS: &[&str] = &[
    "amazing",
    "awesome",
    "beautiful",
    "best",
    "brilliant",
    "calm",
    "cheerful",
    "delighted",
    "enjoy",
    "enjoyed",
    "enjoying",
    "excellent",
    "excited",
    "exciting",
    "fantastic",
    "fine",
    "fun",
    "glad",
    "good",
    "grateful",
    "great",
    "happy",
    "hopeful",
    "incredible",
    "joy",
    "like",
    "love",
    "loved",
    "lovely",
    "loving",
    "nice",
    "perfect",
    "proud",
    "relaxed",
    "thankful",
    "thanks",
    "thrilled",
    "won",
    "wonderful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "afraid",
    "alone",
    "angry",
    "annoyed",
    "anxious",
    "awful",
    "bad",
    "bored",
    "broke",
    "crying",
    "depressed",
    "disappointed",
    "exhausted",
    "fail",
    "failed",
    "frustrated",
    "hate",
    "hated",
    "horrible",
    "hurt",
    "lonely",
    "lost",
    "miserable",
    "nervous",
    "pain",
    "sad",
    "scared",
    "sick",
    "stressed",
    "terrible",
    "tired",
    "unhappy",
    "upset",
    "worried",
    "worse",
    "worst",
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "hardly", "don't", "dont", "didn't", "doesn't", "isn't", "wasn't",
    "aren't", "can't", "cannot", "won't", "nothing",
];

/// Keyword heuristic classifier. Needs no model file.
#[derive(Debug, Clone, Default)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Count `(positive, negative)` keyword hits, with negation applied.
    fn score(utterance: &str) -> (usize, usize) {
        let lower = utterance.to_lowercase().replace('\u{2019}', "'");
        let words: Vec<&str> = lower
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|w| !w.is_empty())
            .collect();

        let mut positive = 0;
        let mut negative = 0;
        for (i, word) in words.iter().enumerate() {
            let negated = i > 0 && NEGATORS.contains(&words[i - 1]);
            if POSITIVE_WORDS.contains(word) {
                if negated {
                    negative += 1;
                } else {
                    positive += 1;
                }
            } else if NEGATIVE_WORDS.contains(word) {
                if negated {
                    positive += 1;
                } else {
                    negative += 1;
                }
            }
        }
        (positive, negative)
    }
}

impl Classifier for LexiconClassifier {
    fn classify(&self, utterance: &str) -> Sentiment {
        let (positive, negative) = Self::score(utterance);
        match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────
