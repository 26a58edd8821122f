//! Error types for biolit

use thiserror::Error;

/// Result type alias for biolit operations
pub type Result<T> = std::result::Result<T, BiolitError>;

/// Main error type for biolit
#[derive(Error, Debug)]
pub enum BiolitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid range '{0}': expected <start>:<end>")]
    InvalidRange(String),
}

impl BiolitError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
