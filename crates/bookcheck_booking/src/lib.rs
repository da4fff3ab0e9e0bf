// --- File: crates/bookcheck_booking/src/lib.rs ---

pub mod client;    // HTTP calls against the booking and auth endpoints
pub mod error;     // Booking-specific errors
pub mod models;    // Wire types
pub mod scenarios; // Ordered checks built from workflow calls
pub mod session;   // Per-scenario state
pub mod workflow;  // One method per API operation

pub use client::{ApiResponse, BookingClient};
pub use error::BookingError;
pub use models::{Booking, BookingDates, BookingId, Operation};
pub use scenarios::{run_concurrently, Scenario, ScenarioOutcome};
pub use session::BookingSession;
pub use workflow::BookingWorkflow;
