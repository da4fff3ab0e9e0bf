// --- File: crates/bookcheck_booking/src/client.rs ---

use bookcheck_common::{client_for, reason_phrase, to_header_map};
use bookcheck_config::ApiConfig;
use hyper::ext::ReasonPhrase;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::BookingError;
use crate::models::{BookingId, TokenRequest};

/// Status line and raw body of one API call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// Reason phrase as sent by the server.
    pub reason: Option<String>,
    pub body: String,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, BookingError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    pub fn phrase(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

/// The reason phrase from the response's status line.
///
/// hyper only records the phrase when it differs from the canonical one for
/// the status code, so the canonical phrase is used when nothing was recorded.
fn wire_reason(response: &Response) -> Option<String> {
    match response.extensions().get::<ReasonPhrase>() {
        Some(reason) => Some(String::from_utf8_lossy(reason.as_bytes()).into_owned()),
        None => reason_phrase(response.status()).map(str::to_string),
    }
}

/// Thin HTTP layer over the booking and auth endpoints of one profile.
///
/// Every method performs exactly one request and returns whatever the API
/// answered; judging the answer is left to the workflow.
#[derive(Debug, Clone)]
pub struct BookingClient {
    http: Client,
    api: Arc<ApiConfig>,
}

impl BookingClient {
    pub fn new(api: Arc<ApiConfig>) -> Result<Self, BookingError> {
        let http = client_for(&api)?;
        Ok(Self { http, api })
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    /// Converts a configured header set, mapping failures to `InvalidHeaders`.
    pub fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, BookingError> {
        to_header_map(headers).map_err(|err| BookingError::InvalidHeaders(err.to_string()))
    }

    pub fn default_headers(&self) -> Result<HeaderMap, BookingError> {
        Self::header_map(&self.api.headers)
    }

    pub async fn create_booking(
        &self,
        headers: HeaderMap,
        body: String,
    ) -> Result<ApiResponse, BookingError> {
        let url = self.api.booking_url();
        let request = self.http.post(&url).headers(headers).body(body);
        self.send(request, Method::POST, &url).await
    }

    pub async fn get_booking(&self, id: &BookingId) -> Result<ApiResponse, BookingError> {
        let url = self.api.booking_item_url(id.as_str());
        let headers = self.default_headers()?;
        self.send(self.http.get(&url).headers(headers), Method::GET, &url).await
    }

    pub async fn replace_booking(
        &self,
        id: &BookingId,
        headers: HeaderMap,
        body: String,
    ) -> Result<ApiResponse, BookingError> {
        let url = self.api.booking_item_url(id.as_str());
        let request = self.http.put(&url).headers(headers).body(body);
        self.send(request, Method::PUT, &url).await
    }

    pub async fn patch_booking(
        &self,
        id: &BookingId,
        headers: HeaderMap,
        body: String,
    ) -> Result<ApiResponse, BookingError> {
        let url = self.api.booking_item_url(id.as_str());
        let request = self.http.patch(&url).headers(headers).body(body);
        self.send(request, Method::PATCH, &url).await
    }

    pub async fn delete_booking(
        &self,
        id: &BookingId,
        headers: HeaderMap,
    ) -> Result<ApiResponse, BookingError> {
        let url = self.api.booking_item_url(id.as_str());
        self.send(self.http.delete(&url).headers(headers), Method::DELETE, &url).await
    }

    /// Posts the profile's credentials to the auth endpoint.
    pub async fn create_token(&self) -> Result<ApiResponse, BookingError> {
        let url = self.api.auth_url();
        let credentials = TokenRequest {
            username: &self.api.credentials.username,
            password: &self.api.credentials.password,
        };
        let headers = self.default_headers()?;
        let request = self.http.post(&url).headers(headers).json(&credentials);
        self.send(request, Method::POST, &url).await
    }

    async fn send(
        &self,
        request: RequestBuilder,
        method: Method,
        url: &str,
    ) -> Result<ApiResponse, BookingError> {
        debug!("Sending {} request to {}", method, url);
        let response = request.send().await?;
        let status = response.status();
        let reason = wire_reason(&response);
        let body = response.text().await?;
        info!("{} {} -> {} {}", method, url, status.as_u16(), reason.as_deref().unwrap_or(""));
        if !status.is_success() {
            debug!("Response body (raw): {}", body);
        }
        Ok(ApiResponse { status, reason, body })
    }
}
