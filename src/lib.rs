//! moodbot: a sentiment-aware conversational agent for the terminal.
//!
//! Each user utterance flows through a short pipeline:
//! Input → Translation → Sentiment → Intensity → Reply → History
//!
//! # Architecture
//!
//! - **Translation** ([`translate`]): best-effort, fail-open normalization to English
//! - **Sentiment** ([`sentiment`]): pluggable classifier producing a [`Sentiment`]
//! - **Intensity** ([`intensity`]): escalation from the last few sentiments
//! - **Replies** ([`responses`]): recall of earlier exchanges, else a pooled template
//! - **History** ([`history`]): bounded exchange log persisted as JSON
//! - **Session** ([`session`]): turn orchestration and the interactive console

pub mod app_dirs;
pub mod config;
pub mod error;
pub mod history;
pub mod intensity;
pub mod logging;
pub mod responses;
pub mod sentiment;
pub mod session;
pub mod translate;

pub use config::ChatConfig;
pub use error::{ChatError, Result};
pub use history::{Exchange, HistoryBuffer, HistoryStore, SentimentTrend};
pub use intensity::{Intensity, resolve_intensity};
pub use responses::{Picker, RandomPicker, Reply, ResponseSelector, ResponseTable};
pub use sentiment::{Classifier, Sentiment};
pub use session::{ChatEngine, Console, Outcome, SessionContext, Turn};
pub use translate::{Translator, translate_text};
