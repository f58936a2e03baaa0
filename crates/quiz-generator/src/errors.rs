//! Error types for quiz generation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Invalid quiz format: {0}")]
    Schema(String),

    #[error("No valid quiz questions could be generated")]
    EmptyResult,

    #[error("Could not extract JSON from response")]
    NoJsonFound,

    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model task failed: {0}")]
    Dispatch(String),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
