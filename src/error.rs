use std::io;
use thiserror::Error;

/// The single failure kind of the game.
///
/// Every failure (bad word list, corrupt score record, unwritable log) is
/// reported with a human-readable message and, when it came from the
/// filesystem, the underlying I/O error as its source.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    #[source]
    source: Option<io::Error>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            message: message.into(),
            source: Some(source),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
