// ⚠️ Error Types - Library-level failures
// The binaries wrap these in anyhow::Result with context.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    /// User input that should have been a number but was not
    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
