//! Error types for the launcher

use std::io;
use thiserror::Error;

/// Main error type for the launcher
#[derive(Error, Debug)]
pub enum AssistError {
    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for launcher operations
pub type Result<T> = std::result::Result<T, AssistError>;

impl From<String> for AssistError {
    fn from(s: String) -> Self {
        AssistError::Other(s)
    }
}

impl From<&str> for AssistError {
    fn from(s: &str) -> Self {
        AssistError::Other(s.to_string())
    }
}
