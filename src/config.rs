//! Configuration types for the conversational agent.

use crate::app_dirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Conversation history persistence.
    pub history: HistoryConfig,
    /// Sentiment classifier selection.
    pub classifier: ClassifierConfig,
    /// Input translation settings.
    pub translation: TranslationConfig,
    /// Response pool overrides.
    pub responses: ResponsesConfig,
    /// Interactive session behaviour.
    pub session: SessionConfig,
}

/// Conversation history persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// JSON file the last exchanges are written to on confirmed exit.
    pub path: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: app_dirs::history_file(),
        }
    }
}

/// Which sentiment classifier backend to use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierBackend {
    /// Built-in keyword heuristic, needs no model file.
    #[default]
    Lexicon,
    /// Exported TF-IDF + multinomial naive Bayes model (JSON).
    NaiveBayes,
}

/// Sentiment classifier configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Classifier backend.
    pub backend: ClassifierBackend,
    /// Model file, required by [`ClassifierBackend::NaiveBayes`].
    pub model_path: Option<PathBuf>,
}

/// Translation service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Whether user input is translated before classification.
    pub enabled: bool,
    /// Translation endpoint speaking the `translate_a/single` protocol.
    pub endpoint: String,
    /// Source language code (`auto` lets the service detect it).
    pub source: String,
    /// Target language code.
    pub target: String,
    /// Request timeout in seconds. A timeout falls back to the original text.
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://translate.googleapis.com/translate_a/single".to_owned(),
            source: "auto".to_owned(),
            target: "en".to_owned(),
            timeout_secs: 10,
        }
    }
}

/// Response pool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsesConfig {
    /// Optional TOML file replacing the built-in response pools.
    pub path: Option<PathBuf>,
}

/// Interactive session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name the bot prints before each of its lines.
    pub bot_name: String,
    /// Name used when the user leaves the name prompt empty.
    pub default_user_name: String,
    /// Per-character delay of the typing effect in ms (0 prints lines at once).
    pub typing_delay_ms: u64,
    /// Inputs (case-insensitive) that ask to end the session.
    pub exit_keywords: Vec<String>,
    /// Answers (case-insensitive) that confirm ending the session.
    pub confirm_words: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bot_name: "Chatbot".to_owned(),
            default_user_name: "Friend".to_owned(),
            typing_delay_ms: 20,
            exit_keywords: vec!["exit".to_owned(), "bye".to_owned(), "quit".to_owned()],
            confirm_words: vec!["yes".to_owned(), "y".to_owned()],
        }
    }
}

impl ChatConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::ChatError::Config(e.to_string()))
    }

    /// Load the config at the default location, or defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default() -> crate::error::Result<Self> {
        let path = Self::default_config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::ChatError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `<config_dir>/config.toml`.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        app_dirs::config_file()
    }
}
