//! Centralized error types for the core data contracts.

use thiserror::Error;

/// Main error type for core operations.
#[derive(Error, Debug)]
pub enum TaxoError {
    #[error("Invalid identifier '{0}': expected a numeric node id")]
    InvalidId(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for core operations.
pub type TaxoResult<T> = Result<T, TaxoError>;

impl TaxoError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}
