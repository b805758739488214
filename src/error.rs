//! Error types for the moodbot conversation engine.

/// Top-level error type for the conversational agent.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// Sentiment model loading or validation error.
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Translation service error (always recovered by the caller).
    #[error("translation error: {0}")]
    Translation(String),

    /// Conversation history persistence error.
    #[error("history error: {0}")]
    History(String),

    /// Response table loading or validation error.
    #[error("responses error: {0}")]
    Responses(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ChatError>;
