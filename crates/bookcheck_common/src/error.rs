// --- File: crates/bookcheck_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

use crate::format::FormatError;

/// The base error type shared by all bookcheck crates.
///
/// Crate-specific errors convert into this type via `From` so callers that
/// only care about the category can match on it.
#[derive(Error, Debug)]
pub enum BookcheckError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A response did not match what the check expected
    #[error("Assertion failed: {0}")]
    AssertionError(String),

    /// A call was made before the state it depends on existed
    #[error("Precondition failed: {0}")]
    PreconditionError(String),

    /// A request template could not be filled
    #[error("Template error: {0}")]
    TemplateError(#[from] FormatError),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

// Common error conversions
impl From<config::ConfigError> for BookcheckError {
    fn from(err: config::ConfigError) -> Self {
        BookcheckError::ConfigError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> BookcheckError {
    BookcheckError::ConfigError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> BookcheckError {
    BookcheckError::InternalError(message.to_string())
}
