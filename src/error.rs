//! Custom error types for costwatch
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Degenerate data conditions (missing
//! periods, zero-cost deltas) are not errors; they are absorbed by the
//! zero-fill and null-delta policies in the ledger modules.

use thiserror::Error;

/// The main error type for costwatch operations
#[derive(Error, Debug)]
pub enum CostwatchError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Malformed cost-data input
    #[error("Cost data error: {0}")]
    Data(String),

    /// Upstream cost query failure; aborts the run
    #[error("Cost query failed: {0}")]
    Query(String),

    /// Report delivery failure; aborts the run after rendering
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

impl CostwatchError {
    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for CostwatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CostwatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for CostwatchError {
    fn from(err: csv::Error) -> Self {
        Self::Data(err.to_string())
    }
}

/// Result type alias for costwatch operations
pub type CostwatchResult<T> = Result<T, CostwatchError>;
