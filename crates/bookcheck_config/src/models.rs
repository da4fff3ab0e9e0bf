// --- File: crates/bookcheck_config/src/models.rs ---

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fmt;

/// Environment variable that selects the active profile.
pub const RUN_ENV_VAR: &str = "RUN_ENV";

/// The only flag value that selects the test profile.
pub const TEST_SENTINEL: &str = "test";

/// Named configuration context selecting which data and endpoints are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Test,
    Production,
}

impl Environment {
    /// Maps a raw flag value to an environment.
    ///
    /// Only the exact sentinel `"test"` selects [`Environment::Test`]. Every
    /// other value, including an empty string or a different casing, falls
    /// through to [`Environment::Production`] without an error.
    pub fn from_flag(flag: &str) -> Self {
        if flag == TEST_SENTINEL {
            Environment::Test
        } else {
            Environment::Production
        }
    }

    /// Reads `RUN_ENV` from the process environment.
    ///
    /// An unset variable selects production, same as any unrecognized value.
    pub fn from_env() -> Self {
        env::var(RUN_ENV_VAR)
            .map(|flag| Self::from_flag(&flag))
            .unwrap_or(Environment::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- API Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// JSON-shaped request templates with `{0}` first name, `{1}` surname and
/// `{2}` additional needs placeholders.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BodyTemplates {
    pub booking: String,
    pub partial_booking: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub base_url: String, // e.g. https://restful-booker.herokuapp.com
    pub booking_path: String,
    pub auth_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Default headers sent on unauthenticated calls.
    pub headers: BTreeMap<String, String>,
    /// A header set the API is expected to reject with a server error.
    pub invalid_headers: BTreeMap<String, String>,
    pub credentials: Credentials,
    pub templates: BodyTemplates,
}

fn default_timeout_secs() -> u64 {
    30
}

impl ApiConfig {
    /// URL of the booking collection endpoint.
    pub fn booking_url(&self) -> String {
        join_url(&self.base_url, &self.booking_path)
    }

    /// URL of a single booking.
    pub fn booking_item_url(&self, booking_id: &str) -> String {
        format!("{}/{}", self.booking_url(), booking_id)
    }

    pub fn auth_url(&self) -> String {
        join_url(&self.base_url, &self.auth_path)
    }

    /// The configured content type, falling back to JSON.
    pub fn content_type(&self) -> &str {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str())
            .unwrap_or("application/json")
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

// --- Test Data ---
/// The three top-level guest fields the templates substitute.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct GuestDetails {
    pub firstname: String,
    pub lastname: String,
    pub additionalneeds: String,
}

impl GuestDetails {
    /// Values in template placeholder order.
    pub fn as_template_args(&self) -> [&str; 3] {
        [&self.firstname, &self.lastname, &self.additionalneeds]
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedDates {
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
}

/// Status codes each operation is expected to return.
#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub struct ExpectedStatus {
    pub create: u16,
    pub read: u16,
    pub token: u16,
    pub update: u16,
    pub partial_update: u16,
    // The target API answers deletes with 201 rather than 200/204.
    pub delete: u16,
    pub read_deleted: u16,
    pub invalid_headers: u16,
    pub update_without_token: u16,
}

/// Reason phrases asserted by the negative checks.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StatusText {
    pub not_found: String,
    pub internal_server_error: String,
    pub forbidden: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TestData {
    pub booking: GuestDetails,
    pub booking_dates: ExpectedDates,
    pub updated: GuestDetails,
    pub partially_updated: GuestDetails,
    pub expected_status: ExpectedStatus,
    pub status_text: StatusText,
}

// --- Profiles ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EnvironmentProfile {
    pub api: ApiConfig,
    pub data: TestData,
}

/// Both profiles as loaded from configuration.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Environments {
    pub test: EnvironmentProfile,
    pub production: EnvironmentProfile,
}

impl Environments {
    pub fn profile(&self, environment: Environment) -> &EnvironmentProfile {
        match environment {
            Environment::Test => &self.test,
            Environment::Production => &self.production,
        }
    }

    /// Returns the data/config pair for one environment.
    ///
    /// Both halves always come from the same profile.
    pub fn resolve(&self, environment: Environment) -> (&TestData, &ApiConfig) {
        let profile = self.profile(environment);
        (&profile.data, &profile.api)
    }
}
