//! Bounded conversation memory, persisted as a flat JSON file.
//!
//! Each exchange is stored as a three-element array:
//!
//! ```json
//! [
//!     ["I am sad", "I understand. 🤗", 0],
//!     ["I got the job!", "Glad to hear that!", 1]
//! ]
//! ```
//!
//! The third element is the sentiment code (`0` negative, `1` positive,
//! `2` neutral). The file is replaced in full on every save.

use crate::error::{ChatError, Result};
use crate::intensity::{Intensity, resolve_intensity};
use crate::sentiment::Sentiment;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Maximum number of exchanges (and trend labels) kept.
pub const MAX_HISTORY: usize = 5;

/// One completed turn: what the user said, what the bot answered, and the
/// sentiment the classifier assigned to the utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ExchangeRecord", into = "ExchangeRecord")]
pub struct Exchange {
    pub user_utterance: String,
    pub bot_response: String,
    pub sentiment: Sentiment,
}

impl Exchange {
    #[must_use]
    pub fn new(
        user_utterance: impl Into<String>,
        bot_response: impl Into<String>,
        sentiment: Sentiment,
    ) -> Self {
        Self {
            user_utterance: user_utterance.into(),
            bot_response: bot_response.into(),
            sentiment,
        }
    }
}

/// On-disk shape of an [`Exchange`].
#[derive(Serialize, Deserialize)]
struct ExchangeRecord(String, String, Sentiment);

impl From<ExchangeRecord> for Exchange {
    fn from(ExchangeRecord(user_utterance, bot_response, sentiment): ExchangeRecord) -> Self {
        Self {
            user_utterance,
            bot_response,
            sentiment,
        }
    }
}

impl From<Exchange> for ExchangeRecord {
    fn from(exchange: Exchange) -> Self {
        Self(exchange.user_utterance, exchange.bot_response, exchange.sentiment)
    }
}

fn push_bounded<T>(queue: &mut VecDeque<T>, item: T) {
    queue.push_back(item);
    while queue.len() > MAX_HISTORY {
        queue.pop_front();
    }
}

/// The last [`MAX_HISTORY`] exchanges, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryBuffer {
    exchanges: VecDeque<Exchange>,
}

impl HistoryBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append at the tail, evicting the oldest exchange when full.
    pub fn push(&mut self, exchange: Exchange) {
        push_bounded(&mut self.exchanges, exchange);
    }

    /// Exchanges from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Exchange> {
        self.exchanges.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }
}

impl<'a> IntoIterator for &'a HistoryBuffer {
    type Item = &'a Exchange;
    type IntoIter = std::collections::vec_deque::Iter<'a, Exchange>;

    fn into_iter(self) -> Self::IntoIter {
        self.exchanges.iter()
    }
}

/// The last [`MAX_HISTORY`] sentiment labels, oldest first.
///
/// Kept apart from [`HistoryBuffer`] because the label of the current turn is
/// needed before its response (and therefore its exchange) exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentTrend {
    labels: VecDeque<Sentiment>,
}

impl SentimentTrend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the trend from persisted exchanges so escalation carries over
    /// between sessions.
    #[must_use]
    pub fn from_history(history: &HistoryBuffer) -> Self {
        let mut trend = Self::new();
        for exchange in history {
            trend.push(exchange.sentiment);
        }
        trend
    }

    pub fn push(&mut self, sentiment: Sentiment) {
        push_bounded(&mut self.labels, sentiment);
    }

    /// Labels from oldest to newest.
    #[must_use]
    pub fn labels(&self) -> Vec<Sentiment> {
        self.labels.iter().copied().collect()
    }

    /// Intensity implied by the current trend.
    #[must_use]
    pub fn intensity(&self) -> Intensity {
        resolve_intensity(&self.labels())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// File-backed persistence for [`HistoryBuffer`].
///
/// Single-writer: nothing guards against two sessions sharing one file.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load persisted history. Never fails.
    ///
    /// A missing, empty, unreadable or unparsable file yields an empty buffer.
    /// Elements that are not `[string, string, sentiment code]` are dropped.
    /// When more than [`MAX_HISTORY`] valid records are stored, the newest win.
    #[must_use]
    pub fn load(&self) -> HistoryBuffer {
        let body = match std::fs::read_to_string(&self.path) {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no history file, starting fresh");
                return HistoryBuffer::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read history file");
                return HistoryBuffer::new();
            }
        };
        if body.trim().is_empty() {
            return HistoryBuffer::new();
        }

        let entries: Vec<serde_json::Value> = match serde_json::from_str(&body) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt history file ignored");
                return HistoryBuffer::new();
            }
        };

        let mut buffer = HistoryBuffer::new();
        let mut discarded = 0usize;
        for entry in entries {
            match serde_json::from_value::<Exchange>(entry) {
                Ok(exchange) => buffer.push(exchange),
                Err(_) => discarded += 1,
            }
        }
        if discarded > 0 {
            warn!(
                path = %self.path.display(),
                discarded,
                "dropped malformed history records"
            );
        }
        debug!(path = %self.path.display(), loaded = buffer.len(), "history loaded");
        buffer
    }

    /// Replace the stored history with `history`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, history: &HistoryBuffer) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let records: Vec<&Exchange> = history.iter().collect();
        let data = serde_json::to_string_pretty(&records)
            .map_err(|e| ChatError::History(format!("failed to serialize history: {e}")))?;
        std::fs::write(&self.path, data)?;
        info!(path = %self.path.display(), exchanges = history.len(), "history saved");
        Ok(())
    }
}
