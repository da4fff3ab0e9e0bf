// --- File: crates/bookcheck_booking/src/error.rs ---
use bookcheck_common::{BookcheckError, FormatError};
use thiserror::Error;

use crate::models::Operation;

/// Everything that can end a scenario.
#[derive(Error, Debug)]
pub enum BookingError {
    /// Transport-level failure talking to the booking API
    #[error("Booking API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("Failed to parse booking API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Request body template could not be filled
    #[error("Failed to build request body: {0}")]
    FormatError(#[from] FormatError),

    /// Configured headers could not be turned into a request header map
    #[error("Invalid request headers: {0}")]
    InvalidHeaders(String),

    #[error("{operation}: expected status {expected}, got {actual} (body: {body})")]
    UnexpectedStatus {
        operation: Operation,
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("{operation}: expected status phrase {expected:?}, got {actual:?}")]
    UnexpectedPhrase {
        operation: Operation,
        expected: String,
        actual: Option<String>,
    },

    #[error("{operation}: field {field} expected {expected:?}, got {actual:?}")]
    FieldMismatch {
        operation: Operation,
        field: &'static str,
        expected: String,
        actual: String,
    },

    #[error("{operation}: response is missing field {field}")]
    MissingField {
        operation: Operation,
        field: &'static str,
    },

    /// The call needs a booking id that no earlier create produced
    #[error("{0} requires a booking, run create first")]
    MissingBooking(Operation),

    /// The call needs a token that no earlier generate-token produced
    #[error("{0} requires an access token, run generate-token first")]
    MissingToken(Operation),
}

/// Convert BookingError to BookcheckError
impl From<BookingError> for BookcheckError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::RequestError(e) => {
                BookcheckError::HttpError(format!("Booking request error: {}", e))
            }
            BookingError::ParseError(e) => {
                BookcheckError::ParseError(format!("Booking response parse error: {}", e))
            }
            BookingError::FormatError(e) => BookcheckError::TemplateError(e),
            BookingError::InvalidHeaders(msg) => {
                BookcheckError::ConfigError(format!("Invalid request headers: {}", msg))
            }
            err @ (BookingError::UnexpectedStatus { .. }
            | BookingError::UnexpectedPhrase { .. }
            | BookingError::FieldMismatch { .. }
            | BookingError::MissingField { .. }) => BookcheckError::AssertionError(err.to_string()),
            err @ (BookingError::MissingBooking(_) | BookingError::MissingToken(_)) => {
                BookcheckError::PreconditionError(err.to_string())
            }
        }
    }
}
