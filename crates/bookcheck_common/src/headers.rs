// --- File: crates/bookcheck_common/src/headers.rs ---
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;

use crate::error::BookcheckError;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const COOKIE: &str = "Cookie";

/// Builds the header set for authenticated calls.
///
/// The token is embedded verbatim as `token=<token>`; its shape is not
/// checked.
pub fn auth_headers(content_type: &str, token: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (CONTENT_TYPE.to_string(), content_type.to_string()),
        (COOKIE.to_string(), format!("token={}", token)),
    ])
}

/// Converts a configured header mapping into a request header map.
pub fn to_header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, BookcheckError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
            BookcheckError::ConfigError(format!("invalid header name {:?}: {}", name, err))
        })?;
        let value = HeaderValue::from_str(value).map_err(|err| {
            BookcheckError::ConfigError(format!("invalid value for header {}: {}", name, err))
        })?;
        map.insert(name, value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_headers_carry_token_cookie() {
        let headers = auth_headers("application/json", "abc123");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["Content-Type"], "application/json");
        assert_eq!(headers["Cookie"], "token=abc123");
    }

    #[test]
    fn token_is_not_validated() {
        let headers = auth_headers("application/json", "");
        assert_eq!(headers["Cookie"], "token=");
    }

    #[test]
    fn header_map_is_case_insensitive() {
        let map = to_header_map(&auth_headers("application/json", "t")).unwrap();
        assert_eq!(map.get("content-type").unwrap(), "application/json");
        assert_eq!(map.get("cookie").unwrap(), "token=t");
    }

    #[test]
    fn invalid_header_value_is_rejected() {
        let headers = BTreeMap::from([("Cookie".to_string(), "token=\nx".to_string())]);
        assert!(matches!(
            to_header_map(&headers),
            Err(BookcheckError::ConfigError(_))
        ));
    }
}
