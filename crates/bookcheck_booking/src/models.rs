// --- File: crates/bookcheck_booking/src/models.rs ---

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a remote booking.
///
/// The API returns it as a JSON number; strings are accepted too. Either way
/// it is only ever echoed back into URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawBookingId", into = "String")]
pub struct BookingId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBookingId {
    Number(u64),
    Text(String),
}

impl From<RawBookingId> for BookingId {
    fn from(raw: RawBookingId) -> Self {
        match raw {
            RawBookingId::Number(n) => BookingId(n.to_string()),
            RawBookingId::Text(s) => BookingId(s),
        }
    }
}

impl From<BookingId> for String {
    fn from(id: BookingId) -> Self {
        id.0
    }
}

impl BookingId {
    pub fn new(id: impl Into<String>) -> Self {
        BookingId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Wire models ---
// Every field is optional so a missing field surfaces as an assertion
// failure naming the field rather than as a parse error.

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct BookingDates {
    pub checkin: Option<NaiveDate>,
    pub checkout: Option<NaiveDate>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Booking {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub totalprice: Option<i64>,
    pub depositpaid: Option<bool>,
    pub bookingdates: Option<BookingDates>,
    pub additionalneeds: Option<String>,
}

/// Response of `POST /booking`.
#[derive(Deserialize, Debug, Clone)]
pub struct CreatedBooking {
    #[serde(default)]
    pub bookingid: Option<BookingId>,
    #[serde(default)]
    pub booking: Option<Booking>,
}

#[derive(Serialize, Debug)]
pub struct TokenRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response of `POST /auth`. Rejected credentials come back as a `reason`
/// with a success status.
#[derive(Deserialize, Debug, Clone)]
pub struct TokenResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// The calls the workflow driver can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    GenerateToken,
    Update,
    PartialUpdate,
    Delete,
    ReadDeleted,
    CreateWithInvalidHeaders,
    UpdateWithoutToken,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::GenerateToken => "generate-token",
            Operation::Update => "update",
            Operation::PartialUpdate => "partial-update",
            Operation::Delete => "delete",
            Operation::ReadDeleted => "read-deleted",
            Operation::CreateWithInvalidHeaders => "create-with-invalid-headers",
            Operation::UpdateWithoutToken => "update-without-token",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
