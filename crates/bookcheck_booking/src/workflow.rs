// --- File: crates/bookcheck_booking/src/workflow.rs ---
//! The workflow driver: one method per booking API operation.
//!
//! Each method makes a single call, checks the status (and, where the
//! operation returns a booking, the field values) against the active
//! profile's data, and records any identifier or token it produced in the
//! caller's [`BookingSession`]. The first failed check returns an error and
//! nothing is retried.

use bookcheck_common::{auth_headers, format_template};
use bookcheck_config::{EnvironmentProfile, ExpectedDates, GuestDetails, TestData};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

use crate::client::{ApiResponse, BookingClient};
use crate::error::BookingError;
use crate::models::{Booking, BookingId, CreatedBooking, Operation, TokenResponse};
use crate::session::BookingSession;

/// Longest response body echoed into an `UnexpectedStatus` error.
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Clone)]
pub struct BookingWorkflow {
    client: BookingClient,
    data: Arc<TestData>,
}

impl BookingWorkflow {
    /// Builds a driver for one resolved environment profile.
    pub fn new(profile: &EnvironmentProfile) -> Result<Self, BookingError> {
        let client = BookingClient::new(Arc::new(profile.api.clone()))?;
        Ok(Self::from_parts(client, Arc::new(profile.data.clone())))
    }

    pub fn from_parts(client: BookingClient, data: Arc<TestData>) -> Self {
        Self { client, data }
    }

    pub fn data(&self) -> &TestData {
        &self.data
    }

    pub fn client(&self) -> &BookingClient {
        &self.client
    }

    /// POST a new booking built from the profile's guest details.
    pub async fn create(&self, session: &mut BookingSession) -> Result<BookingId, BookingError> {
        let operation = Operation::Create;
        let api = self.client.api();
        let body = format_template(&api.templates.booking, &self.data.booking.as_template_args())?;

        let response = self
            .client
            .create_booking(self.client.default_headers()?, body)
            .await?;
        expect_status(operation, &response, self.data.expected_status.create)?;

        let created: CreatedBooking = response.json()?;
        let booking_id = created
            .bookingid
            .filter(|id| !id.is_empty())
            .ok_or(BookingError::MissingField {
                operation,
                field: "bookingid",
            })?;

        info!(booking_id = %booking_id, "booking created");
        session.set_booking_id(booking_id.clone());
        Ok(booking_id)
    }

    /// GET the session's booking and check it still holds the created values.
    pub async fn read(&self, session: &mut BookingSession) -> Result<Booking, BookingError> {
        let operation = Operation::Read;
        let booking_id = session.require_booking(operation)?;

        let response = self.client.get_booking(&booking_id).await?;
        expect_status(operation, &response, self.data.expected_status.read)?;

        let booking: Booking = response.json()?;
        check_guest(operation, &booking, &self.data.booking)?;
        check_dates(operation, &booking, &self.data.booking_dates)?;
        Ok(booking)
    }

    /// Exchange the profile's credentials for an access token.
    pub async fn generate_token(
        &self,
        session: &mut BookingSession,
    ) -> Result<String, BookingError> {
        let operation = Operation::GenerateToken;

        let response = self.client.create_token().await?;
        expect_status(operation, &response, self.data.expected_status.token)?;

        let issued: TokenResponse = response.json()?;
        let token = match issued.token.filter(|token| !token.is_empty()) {
            Some(token) => token,
            None => {
                if let Some(reason) = issued.reason {
                    warn!("token endpoint refused credentials: {}", reason);
                }
                return Err(BookingError::MissingField {
                    operation,
                    field: "token",
                });
            }
        };

        info!("access token issued");
        session.set_token(token.clone());
        Ok(token)
    }

    /// PUT a full replacement using the profile's updated guest details.
    pub async fn update(&self, session: &mut BookingSession) -> Result<Booking, BookingError> {
        let operation = Operation::Update;
        let booking_id = session.require_booking(operation)?;
        let token = session.require_token(operation)?;
        let api = self.client.api();

        let headers = BookingClient::header_map(&auth_headers(api.content_type(), token))?;
        let body = format_template(&api.templates.booking, &self.data.updated.as_template_args())?;

        let response = self.client.replace_booking(&booking_id, headers, body).await?;
        expect_status(operation, &response, self.data.expected_status.update)?;

        let booking: Booking = response.json()?;
        check_guest(operation, &booking, &self.data.updated)?;
        Ok(booking)
    }

    /// PATCH the booking with the partial template.
    pub async fn partial_update(
        &self,
        session: &mut BookingSession,
    ) -> Result<Booking, BookingError> {
        let operation = Operation::PartialUpdate;
        let booking_id = session.require_booking(operation)?;
        let token = session.require_token(operation)?;
        let api = self.client.api();

        let headers = BookingClient::header_map(&auth_headers(api.content_type(), token))?;
        let body = format_template(
            &api.templates.partial_booking,
            &self.data.partially_updated.as_template_args(),
        )?;

        let response = self.client.patch_booking(&booking_id, headers, body).await?;
        expect_status(operation, &response, self.data.expected_status.partial_update)?;

        let booking: Booking = response.json()?;
        check_guest(operation, &booking, &self.data.partially_updated)?;
        Ok(booking)
    }

    /// DELETE the booking. The API confirms with 201, not 200/204.
    pub async fn delete(&self, session: &mut BookingSession) -> Result<(), BookingError> {
        let operation = Operation::Delete;
        let booking_id = session.require_booking(operation)?;
        let token = session.require_token(operation)?;
        let api = self.client.api();

        let headers = BookingClient::header_map(&auth_headers(api.content_type(), token))?;
        let response = self.client.delete_booking(&booking_id, headers).await?;
        expect_status(operation, &response, self.data.expected_status.delete)?;

        info!(booking_id = %booking_id, "booking deleted");
        Ok(())
    }

    /// GET a booking that has been deleted; expects "Not Found".
    pub async fn read_deleted(&self, session: &mut BookingSession) -> Result<(), BookingError> {
        let operation = Operation::ReadDeleted;
        let booking_id = session.require_booking(operation)?;

        let response = self.client.get_booking(&booking_id).await?;
        expect_status(operation, &response, self.data.expected_status.read_deleted)?;
        expect_phrase(operation, &response, &self.data.status_text.not_found)
    }

    /// POST a booking with the profile's invalid header set; expects a
    /// server error.
    pub async fn create_with_invalid_headers(
        &self,
        _session: &mut BookingSession,
    ) -> Result<(), BookingError> {
        let operation = Operation::CreateWithInvalidHeaders;
        let api = self.client.api();
        let headers = BookingClient::header_map(&api.invalid_headers)?;
        let body = format_template(&api.templates.booking, &self.data.booking.as_template_args())?;

        let response = self.client.create_booking(headers, body).await?;
        expect_status(operation, &response, self.data.expected_status.invalid_headers)?;
        expect_phrase(operation, &response, &self.data.status_text.internal_server_error)
    }

    /// PUT without an auth cookie; expects "Forbidden".
    pub async fn update_without_token(
        &self,
        session: &mut BookingSession,
    ) -> Result<(), BookingError> {
        let operation = Operation::UpdateWithoutToken;
        let booking_id = session.require_booking(operation)?;
        let api = self.client.api();
        let body = format_template(&api.templates.booking, &self.data.updated.as_template_args())?;

        let response = self
            .client
            .replace_booking(&booking_id, self.client.default_headers()?, body)
            .await?;
        expect_status(operation, &response, self.data.expected_status.update_without_token)?;
        expect_phrase(operation, &response, &self.data.status_text.forbidden)
    }
}

fn expect_status(
    operation: Operation,
    response: &ApiResponse,
    expected: u16,
) -> Result<(), BookingError> {
    let actual = response.status.as_u16();
    if actual == expected {
        return Ok(());
    }
    Err(BookingError::UnexpectedStatus {
        operation,
        expected,
        actual,
        body: response.body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    })
}

fn expect_phrase(
    operation: Operation,
    response: &ApiResponse,
    expected: &str,
) -> Result<(), BookingError> {
    match response.phrase() {
        Some(phrase) if phrase == expected => Ok(()),
        actual => Err(BookingError::UnexpectedPhrase {
            operation,
            expected: expected.to_string(),
            actual: actual.map(str::to_string),
        }),
    }
}

fn check_field(
    operation: Operation,
    field: &'static str,
    expected: &str,
    actual: Option<&str>,
) -> Result<(), BookingError> {
    match actual {
        None => Err(BookingError::MissingField { operation, field }),
        Some(value) if value == expected => Ok(()),
        Some(value) => Err(BookingError::FieldMismatch {
            operation,
            field,
            expected: expected.to_string(),
            actual: value.to_string(),
        }),
    }
}

fn check_guest(
    operation: Operation,
    booking: &Booking,
    expected: &GuestDetails,
) -> Result<(), BookingError> {
    check_field(operation, "firstname", &expected.firstname, booking.firstname.as_deref())?;
    check_field(operation, "lastname", &expected.lastname, booking.lastname.as_deref())?;
    check_field(
        operation,
        "additionalneeds",
        &expected.additionalneeds,
        booking.additionalneeds.as_deref(),
    )
}

fn check_date(
    operation: Operation,
    field: &'static str,
    expected: NaiveDate,
    actual: Option<NaiveDate>,
) -> Result<(), BookingError> {
    match actual {
        None => Err(BookingError::MissingField { operation, field }),
        Some(date) if date == expected => Ok(()),
        Some(date) => Err(BookingError::FieldMismatch {
            operation,
            field,
            expected: expected.to_string(),
            actual: date.to_string(),
        }),
    }
}

fn check_dates(
    operation: Operation,
    booking: &Booking,
    expected: &ExpectedDates,
) -> Result<(), BookingError> {
    let dates = booking.bookingdates.as_ref().ok_or(BookingError::MissingField {
        operation,
        field: "bookingdates",
    })?;
    check_date(operation, "bookingdates.checkin", expected.checkin, dates.checkin)?;
    check_date(operation, "bookingdates.checkout", expected.checkout, dates.checkout)
}
