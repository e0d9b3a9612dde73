//! Library error type.

use thiserror::Error;

/// Errors surfaced by the forecast core and its file helpers.
///
/// Insufficient data is never reported here; indicators fall back to neutral values instead.
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ForecastError>;

impl ForecastError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ForecastError::InvalidInput(msg.into())
    }
}
