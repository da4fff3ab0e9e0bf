// --- File: crates/bookcheck_booking/src/session.rs ---

use uuid::Uuid;

use crate::error::BookingError;
use crate::models::{BookingId, Operation};

/// State produced by one call and consumed by the next within a scenario.
///
/// Owned by the scenario and passed to each workflow call, so two scenarios
/// never observe each other's booking or token.
#[derive(Debug, Clone)]
pub struct BookingSession {
    run_id: Uuid,
    booking_id: Option<BookingId>,
    token: Option<String>,
}

impl Default for BookingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingSession {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            booking_id: None,
            token: None,
        }
    }

    /// Identifier used to correlate log lines of one scenario run.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn booking_id(&self) -> Option<&BookingId> {
        self.booking_id.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub(crate) fn set_booking_id(&mut self, id: BookingId) {
        self.booking_id = Some(id);
    }

    pub(crate) fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub(crate) fn require_booking(&self, operation: Operation) -> Result<BookingId, BookingError> {
        self.booking_id
            .clone()
            .ok_or(BookingError::MissingBooking(operation))
    }

    pub(crate) fn require_token(&self, operation: Operation) -> Result<&str, BookingError> {
        self.token
            .as_deref()
            .ok_or(BookingError::MissingToken(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sessions_are_empty_and_distinct() {
        let a = BookingSession::new();
        let b = BookingSession::new();
        assert!(a.booking_id().is_none());
        assert!(a.token().is_none());
        assert_ne!(a.run_id(), b.run_id());
    }

    #[test]
    fn requirements_name_the_operation() {
        let mut session = BookingSession::new();
        assert!(matches!(
            session.require_booking(Operation::Read),
            Err(BookingError::MissingBooking(Operation::Read))
        ));
        assert!(matches!(
            session.require_token(Operation::Delete),
            Err(BookingError::MissingToken(Operation::Delete))
        ));

        session.set_booking_id(BookingId::new("7"));
        session.set_token("abc".to_string());
        assert_eq!(session.require_booking(Operation::Read).unwrap().as_str(), "7");
        assert_eq!(session.require_token(Operation::Delete).unwrap(), "abc");
    }
}
