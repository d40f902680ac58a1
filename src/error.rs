//! Custom error types for autotyper.
//!
//! This module provides structured error types using `thiserror` for better
//! error handling and more informative error messages.

use std::io;
use thiserror::Error;

/// Main error type for autotyper operations.
#[derive(Error, Debug)]
pub enum AutoTyperError {
    /// The text to type is empty after trimming surrounding whitespace.
    #[error("no text to type")]
    EmptyText,

    /// A settings value failed editing-surface validation.
    #[error("invalid value for setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// The settings key does not exist.
    #[error("unknown setting '{key}'")]
    UnknownSetting { key: String },

    /// Error writing the settings file.
    #[error("failed to save settings to '{path}': {reason}")]
    SettingsSave { path: String, reason: String },

    /// Error from the OS keyboard-injection layer.
    #[error("keyboard injection failed: {0}")]
    Injection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for autotyper operations.
pub type Result<T> = std::result::Result<T, AutoTyperError>;

impl AutoTyperError {
    /// Create a new InvalidSetting error.
    pub fn invalid_setting(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a new UnknownSetting error.
    pub fn unknown_setting(key: impl Into<String>) -> Self {
        Self::UnknownSetting { key: key.into() }
    }

    /// Create a new SettingsSave error.
    pub fn settings_save(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SettingsSave {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new Injection error.
    pub fn injection(reason: impl Into<String>) -> Self {
        Self::Injection(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AutoTyperError::EmptyText;
        assert_eq!(err.to_string(), "no text to type");

        let err = AutoTyperError::invalid_setting("start_delay", "must be between 1.0 and 5.0");
        assert_eq!(
            err.to_string(),
            "invalid value for setting 'start_delay': must be between 1.0 and 5.0"
        );

        let err = AutoTyperError::unknown_setting("cursor_blink");
        assert_eq!(err.to_string(), "unknown setting 'cursor_blink'");

        let err = AutoTyperError::settings_save("/etc/nope.json", "permission denied");
        assert_eq!(
            err.to_string(),
            "failed to save settings to '/etc/nope.json': permission denied"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: AutoTyperError = io_err.into();
        assert!(matches!(err, AutoTyperError::Io(_)));
    }
}
