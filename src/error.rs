//! Error taxonomy shared by the execution service and the LLM-backed generators.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TutorError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("failed to start '{program}': {reason}")]
    Toolchain { program: String, reason: String },
    #[error("Execution timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("text generation failed: {0}")]
    Service(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for TutorError {
    fn from(err: reqwest::Error) -> Self {
        TutorError::Service(err.to_string())
    }
}

impl From<serde_json::Error> for TutorError {
    fn from(err: serde_json::Error) -> Self {
        TutorError::Service(format!("malformed JSON: {}", err))
    }
}

pub type TutorResult<T> = Result<T, TutorError>;
