//! Error handling for the skill topology application

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillTopologyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Result not found: {0}")]
    ResultNotFound(String),

    #[error("Result expired: {0}")]
    ResultExpired(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, SkillTopologyError>;

/// Convert HTTP client errors to our custom error type
impl From<reqwest::Error> for SkillTopologyError {
    fn from(err: reqwest::Error) -> Self {
        SkillTopologyError::Network(err.to_string())
    }
}
