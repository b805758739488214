//! Response pools and the response selector.
//!
//! Every (sentiment, intensity) pair owns a non-empty pool of candidate
//! replies. The selector first tries to *recall* an earlier exchange whose
//! utterance appears inside the current one; only when nothing matches does it
//! draw a reply from the pool.
//!
//! Pools can be replaced from a TOML file. Sections and levels that are left
//! out keep their built-in pool:
//!
//! ```toml
//! [negative]
//! strong = ["I'm right here with you."]
//! ```

use crate::error::{ChatError, Result};
use crate::history::HistoryBuffer;
use crate::intensity::Intensity;
use crate::sentiment::Sentiment;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::path::Path;

// ── Built-in pools ──────────────────────────────────────────────────────

/// Indexed by `[sentiment][intensity]`, see [`sentiment_index`] and [`intensity_index`].
const BUILTIN_POOLS: [[&[&str]; 3]; 3] = [
    // Negative
    [
        &[
            "I understand. 🤗",
            "That doesn't sound great. You okay?",
            "That’s tough, but I'm here for you.",
        ],
        &[
            "I'm really sorry you're feeling that way. Want to talk more?",
            "You're not alone. I'm here for you. 🫂",
            "That sounds really difficult.",
        ],
        &[
            "I’m really concerned about you. Please don’t hesitate to share. 💙",
            "I'm here to support you, no matter what. You're strong. 💪",
            "It sounds really hard. Want me to suggest something to help?",
        ],
    ],
    // Positive
    [
        &["That's nice to hear! 😊", "Glad to hear that!", "That's good!"],
        &[
            "That's wonderful! Keep it up! 🌟",
            "You're doing great!",
            "I love your energy! 🚀",
        ],
        &[
            "Wow! That sounds amazing! 🎉",
            "Incredible! So happy for you!",
            "Keep that excitement going! 🔥",
        ],
    ],
    // Neutral
    [
        &["I see... Tell me more.", "Hmm, interesting.", "Got it!"],
        &[
            "That’s quite something! Keep going.",
            "I hear you. What’s on your mind?",
            "Sounds intriguing!",
        ],
        &[
            "Whoa! That’s deep. 🤯",
            "Now that’s something worth thinking about!",
            "That’s really thought-provoking!",
        ],
    ],
];

fn sentiment_index(sentiment: Sentiment) -> usize {
    match sentiment {
        Sentiment::Negative => 0,
        Sentiment::Positive => 1,
        Sentiment::Neutral => 2,
    }
}

fn intensity_index(intensity: Intensity) -> usize {
    match intensity {
        Intensity::Mild => 0,
        Intensity::Moderate => 1,
        Intensity::Strong => 2,
    }
}

// ── Response table ──────────────────────────────────────────────────────

/// Candidate replies for every (sentiment, intensity) pair.
///
/// Every constructor validates the table, so a held `ResponseTable` never has
/// an empty pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseTable {
    pools: [[Vec<String>; 3]; 3],
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OverrideFile {
    negative: Option<OverrideSection>,
    positive: Option<OverrideSection>,
    neutral: Option<OverrideSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OverrideSection {
    mild: Option<Vec<String>>,
    moderate: Option<Vec<String>>,
    strong: Option<Vec<String>>,
}

impl ResponseTable {
    /// The pools shipped with the binary.
    #[must_use]
    pub fn builtin() -> Self {
        let pools = BUILTIN_POOLS
            .map(|row| row.map(|pool| pool.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>()));
        Self { pools }
    }

    /// Built-in pools with the overrides from a TOML file applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a valid override
    /// file, or leaves any pool empty.
    pub fn from_file(path: &Path) -> Result<Self> {
        let body = std::fs::read_to_string(path)?;
        Self::from_toml(&body)
    }

    /// Built-in pools with the overrides from TOML text applied.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Responses`] on invalid TOML, unknown section or
    /// level names, or an empty pool.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let file: OverrideFile = toml::from_str(toml_str)
            .map_err(|e| ChatError::Responses(format!("invalid response file: {e}")))?;

        let mut table = Self::builtin();
        for (sentiment, section) in [
            (Sentiment::Negative, file.negative),
            (Sentiment::Positive, file.positive),
            (Sentiment::Neutral, file.neutral),
        ] {
            let Some(section) = section else { continue };
            for (intensity, pool) in [
                (Intensity::Mild, section.mild),
                (Intensity::Moderate, section.moderate),
                (Intensity::Strong, section.strong),
            ] {
                if let Some(pool) = pool {
                    table.pools[sentiment_index(sentiment)][intensity_index(intensity)] = pool;
                }
            }
        }
        table.validate()?;
        Ok(table)
    }

    /// Check that every (sentiment, intensity) pool has at least one reply and
    /// no blank ones.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Responses`] naming the first empty pool or the
    /// first pool holding a blank reply.
    pub fn validate(&self) -> Result<()> {
        for sentiment in Sentiment::ALL {
            for intensity in Intensity::ALL {
                let pool = self.pool(sentiment, intensity);
                if pool.is_empty() {
                    return Err(ChatError::Responses(format!(
                        "no responses for {sentiment}/{intensity}"
                    )));
                }
                if pool.iter().any(|reply| reply.trim().is_empty()) {
                    return Err(ChatError::Responses(format!(
                        "blank response in {sentiment}/{intensity}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Candidate replies for one pair.
    #[must_use]
    pub fn pool(&self, sentiment: Sentiment, intensity: Intensity) -> &[String] {
        &self.pools[sentiment_index(sentiment)][intensity_index(intensity)]
    }
}

impl Default for ResponseTable {
    fn default() -> Self {
        Self::builtin()
    }
}

// ── Random choice ───────────────────────────────────────────────────────

/// Source of the index used to pick a reply from a pool.
pub trait Picker: Send {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform random [`Picker`] backed by `rand`.
#[derive(Debug, Clone)]
pub struct RandomPicker<R = StdRng> {
    rng: R,
}

impl RandomPicker<StdRng> {
    /// Seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence for a given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng + Send> Picker for RandomPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

// ── Selection ───────────────────────────────────────────────────────────

/// A chosen reply and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Reference to an earlier exchange.
    Recall(String),
    /// Drawn from the (sentiment, intensity) pool.
    Template(String),
}

impl Reply {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Reply::Recall(text) | Reply::Template(text) => text,
        }
    }

    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Reply::Recall(text) | Reply::Template(text) => text,
        }
    }

    #[must_use]
    pub fn is_recall(&self) -> bool {
        matches!(self, Reply::Recall(_))
    }
}

/// Find an earlier exchange whose utterance occurs, ignoring case, inside
/// `utterance`.
///
/// History is scanned oldest to newest and the first match wins. Blank past
/// utterances never match.
#[must_use]
pub fn recall(utterance: &str, history: &HistoryBuffer) -> Option<String> {
    let current = utterance.to_lowercase();
    history
        .iter()
        .find(|exchange| {
            let past = &exchange.user_utterance;
            !past.trim().is_empty() && current.contains(&past.to_lowercase())
        })
        .map(|exchange| {
            format!(
                "I remember you said: '{}'. My response was: '{}'",
                exchange.user_utterance, exchange.bot_response
            )
        })
}

/// Chooses the reply for a turn.
pub struct ResponseSelector {
    table: ResponseTable,
    picker: Box<dyn Picker>,
}

impl ResponseSelector {
    #[must_use]
    pub fn new(table: ResponseTable, picker: Box<dyn Picker>) -> Self {
        Self { table, picker }
    }

    #[must_use]
    pub fn table(&self) -> &ResponseTable {
        &self.table
    }

    /// Recall takes precedence over the pool and ignores intensity.
    ///
    /// Does not touch `history`; recording the exchange is up to the caller.
    pub fn select_response(
        &mut self,
        utterance: &str,
        sentiment: Sentiment,
        intensity: Intensity,
        history: &HistoryBuffer,
    ) -> Reply {
        if let Some(recalled) = recall(utterance, history) {
            return Reply::Recall(recalled);
        }
        let pool = self.table.pool(sentiment, intensity);
        let index = self.picker.pick(pool.len()).min(pool.len() - 1);
        Reply::Template(pool[index].clone())
    }
}

impl std::fmt::Debug for ResponseSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseSelector")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}
