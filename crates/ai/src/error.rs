//! Error types for the AI generator.

use thiserror::Error;

pub type AiResult<T> = std::result::Result<T, AiError>;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("Provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("No API key configured for provider")]
    MissingApiKey,

    #[error("No base URL configured for provider")]
    MissingBaseUrl,

    #[error("Malformed stream frame: {0}")]
    Stream(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
