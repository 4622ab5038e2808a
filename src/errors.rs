//! Error types for filekit

use thiserror::Error;

/// Main error type for filekit
#[derive(Error, Debug)]
pub enum FilekitError {
    #[error("Content sniffing is unavailable and extension fallback is disabled")]
    CapabilityUnavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("MIME table error ({source_id}): {message}")]
    MimeTable {
        source_id: String,
        message: String,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Path builder is incomplete: {0} has not been built")]
    Incomplete(&'static str),
}

impl FilekitError {
    pub(crate) fn table(source_id: &str, message: impl Into<String>) -> Self {
        FilekitError::MimeTable {
            source_id: source_id.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilekitError>;
