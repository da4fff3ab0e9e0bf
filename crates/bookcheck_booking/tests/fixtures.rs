//! Test fixtures for booking workflow tests
//!
//! Provides a small in-memory stand-in for the booking API, mounted on a
//! wiremock server, plus factory functions for profiles and workflows that
//! point at it.
#![allow(dead_code)]

use bookcheck_booking::BookingWorkflow;
use bookcheck_config::{embedded_environments, EnvironmentProfile};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Token the fake API issues for the test profile's credentials.
pub const TOKEN: &str = "abc123";

/// The test profile with its base URL pointed at `base_url`.
pub fn test_profile(base_url: &str) -> EnvironmentProfile {
    let mut profile = embedded_environments()
        .expect("embedded profiles must parse")
        .test;
    profile.api.base_url = base_url.to_string();
    profile
}

pub fn workflow_for(server: &MockServer) -> BookingWorkflow {
    bookcheck_common::logging::init();
    BookingWorkflow::new(&test_profile(&server.uri())).expect("workflow must build")
}

pub fn workflow_with(profile: EnvironmentProfile) -> BookingWorkflow {
    BookingWorkflow::new(&profile).expect("workflow must build")
}

/// A booking body in the shape the API returns.
pub fn booking_json(firstname: &str, lastname: &str, additionalneeds: &str) -> Value {
    json!({
        "firstname": firstname,
        "lastname": lastname,
        "totalprice": 111,
        "depositpaid": true,
        "bookingdates": { "checkin": "2018-01-01", "checkout": "2019-01-01" },
        "additionalneeds": additionalneeds
    })
}

#[derive(Default)]
struct Store {
    next_id: u64,
    bookings: HashMap<u64, Value>,
}

/// Stateful fake of the booking API.
///
/// Mirrors the behavior the checks rely on: JSON-only creates (anything
/// else is a 500), cookie-token auth on mutations (403 without it), 201 on
/// delete and 404 for unknown ids.
#[derive(Clone, Default)]
pub struct FakeBookingApi {
    store: Arc<Mutex<Store>>,
}

impl FakeBookingApi {
    /// Starts a mock server answering every request through the fake.
    ///
    /// Mocks mounted later with a higher priority (lower number) override it.
    pub async fn start() -> (MockServer, FakeBookingApi) {
        let server = MockServer::start().await;
        let api = FakeBookingApi::default();
        Mock::given(any())
            .respond_with(api.clone())
            .mount(&server)
            .await;
        (server, api)
    }

    pub fn booking(&self, id: &str) -> Option<Value> {
        let id: u64 = id.parse().ok()?;
        self.store.lock().unwrap().bookings.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.store.lock().unwrap().bookings.len()
    }
}

fn text(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_string(body)
}

fn header_is(request: &Request, name: &str, expected: &str) -> bool {
    request
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == expected)
        .unwrap_or(false)
}

fn has_token(request: &Request) -> bool {
    header_is(request, "cookie", &format!("token={TOKEN}"))
}

impl Respond for FakeBookingApi {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let segments: Vec<&str> = request.url.path().trim_matches('/').split('/').collect();
        let body: Option<Value> = serde_json::from_slice(&request.body).ok();
        let mut store = self.store.lock().unwrap();

        match (request.method.as_str(), segments.as_slice()) {
            ("POST", ["auth"]) => {
                let accepted = body
                    .map(|b| b["username"] == "admin" && b["password"] == "password123")
                    .unwrap_or(false);
                if accepted {
                    ResponseTemplate::new(200).set_body_json(json!({ "token": TOKEN }))
                } else {
                    ResponseTemplate::new(200).set_body_json(json!({ "reason": "Bad credentials" }))
                }
            }
            ("POST", ["booking"]) => {
                if !header_is(request, "content-type", "application/json") {
                    return text(500, "Internal Server Error");
                }
                let Some(booking) = body else {
                    return text(400, "Bad Request");
                };
                store.next_id += 1;
                let id = store.next_id;
                store.bookings.insert(id, booking.clone());
                let created = json!({ "bookingid": id, "booking": booking });
                ResponseTemplate::new(200).set_body_json(created)
            }
            (method, ["booking", raw_id]) => {
                let Ok(id) = raw_id.parse::<u64>() else {
                    return text(404, "Not Found");
                };
                if method == "GET" {
                    return match store.bookings.get(&id) {
                        Some(booking) => ResponseTemplate::new(200).set_body_json(booking),
                        None => text(404, "Not Found"),
                    };
                }
                if !has_token(request) {
                    return text(403, "Forbidden");
                }
                match method {
                    "PUT" => match (store.bookings.get_mut(&id), body) {
                        (Some(existing), Some(replacement)) => {
                            *existing = replacement.clone();
                            ResponseTemplate::new(200).set_body_json(replacement)
                        }
                        (None, _) => text(405, "Method Not Allowed"),
                        (_, None) => text(400, "Bad Request"),
                    },
                    "PATCH" => match (store.bookings.get_mut(&id), body) {
                        (Some(existing), Some(Value::Object(patch))) => {
                            if let Value::Object(fields) = existing {
                                fields.extend(patch);
                            }
                            ResponseTemplate::new(200).set_body_json(existing.clone())
                        }
                        (None, _) => text(405, "Method Not Allowed"),
                        _ => text(400, "Bad Request"),
                    },
                    "DELETE" => match store.bookings.remove(&id) {
                        Some(_) => text(201, "Created"),
                        None => text(405, "Method Not Allowed"),
                    },
                    _ => text(404, "Not Found"),
                }
            }
            _ => text(404, "Not Found"),
        }
    }
}
