//! Centralized application directory paths for moodbot.
//!
//! Uses the [`dirs`] crate for platform-appropriate directory resolution.
//!
//! # Directory Layout
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | App data | `~/Library/Application Support/moodbot/` | `~/.local/share/moodbot/` |
//! | Config | `~/Library/Application Support/moodbot/` | `~/.config/moodbot/` |
//!
//! # Environment Overrides
//!
//! - `MOODBOT_DATA_DIR` overrides [`data_dir`]
//! - `MOODBOT_CONFIG_DIR` overrides [`config_dir`]

use std::path::PathBuf;

/// Application data root directory.
///
/// Holds the persisted conversation history and log files.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("MOODBOT_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("moodbot"))
        .unwrap_or_else(|| PathBuf::from("/tmp/moodbot-data"))
}

/// Application config directory.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("MOODBOT_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("moodbot"))
        .unwrap_or_else(|| PathBuf::from("/tmp/moodbot-config"))
}

/// Log file directory (`data_dir()/logs/`).
#[must_use]
pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}

/// Persisted conversation history (`data_dir()/chat_history.json`).
#[must_use]
pub fn history_file() -> PathBuf {
    data_dir().join("chat_history.json")
}

/// Main config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}
