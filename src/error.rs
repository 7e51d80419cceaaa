//! Error handling for column collection.
//!
//! Only contract violations and configuration problems are errors. Cells that
//! fail to parse are recorded as warnings and never surface here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Unsupported column type: '{tag}'")]
    UnsupportedColumnType { tag: String },

    #[error("Invalid token at [{row}, {col}]: end of input reached a collector")]
    InvalidToken { row: usize, col: usize },

    #[error("Row {row} is out of bounds for a column of size {size}")]
    RowOutOfBounds { row: usize, size: usize },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Length mismatch: {message}")]
    LengthMismatch { message: String },

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReadError {
    /// Create an unsupported column type error
    pub fn unsupported_column_type(tag: impl Into<String>) -> Self {
        Self::UnsupportedColumnType { tag: tag.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a length mismatch error
    pub fn length_mismatch(message: impl Into<String>) -> Self {
        Self::LengthMismatch {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReadError>;
