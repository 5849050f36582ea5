//! Error handling for the resume ATS client

use thiserror::Error;

/// Reasons a selected file is rejected before it enters the session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a valid file type (PDF, DOC, DOCX, TXT)")]
    UnsupportedType { content_type: String },

    #[error("File size must be less than 5MB")]
    TooLarge { size: u64, limit: u64 },
}

#[derive(Error, Debug)]
pub enum AtsClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Non-success status from the analysis service; the message is already
    /// the best-effort text pulled from the response body.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, AtsClientError>;

impl From<reqwest::Error> for AtsClientError {
    fn from(err: reqwest::Error) -> Self {
        AtsClientError::Transport(err.to_string())
    }
}
