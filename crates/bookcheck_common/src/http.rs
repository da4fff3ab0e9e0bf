// --- File: crates/bookcheck_common/src/http.rs ---
use reqwest::StatusCode;

// Include the client module
pub mod client;

/// The canonical reason phrase for a status code, e.g. "Not Found" for 404.
///
/// Returns `None` for codes without a registered phrase.
pub fn reason_phrase(status: StatusCode) -> Option<&'static str> {
    status.canonical_reason()
}
