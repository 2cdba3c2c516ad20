//! API-key header injection.
//!
//! The key is attached once, as a default header of the `reqwest::Client`
//! that every outgoing call goes through (card discovery, unary RPCs and the
//! SSE stream). Callers build that client up front and hand it to the
//! card resolver and the transport.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{A2AError, A2AResult};

/// Header carrying the agent API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Header set for an optional API key.
///
/// `None` and the empty string both yield an empty map, so an unset key
/// simply omits the header.
///
/// # Errors
///
/// Returns [`A2AError::Config`] if the key is not a valid header value
/// (e.g. it contains a newline).
pub fn api_key_headers(api_key: Option<&str>) -> A2AResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(key) = api_key.filter(|k| !k.is_empty()) {
        let mut value = HeaderValue::from_str(key)
            .map_err(|e| A2AError::Config(format!("API key is not a valid header value: {e}")))?;
        value.set_sensitive(true);
        headers.insert(HeaderName::from_static("x-api-key"), value);
    }
    Ok(headers)
}

/// Build the HTTP client all A2A calls go through.
///
/// `headers` are merged into every request; per-request options (method,
/// body, other headers, timeouts) are left as the caller sets them.
pub fn http_client(headers: HeaderMap, connect_timeout: Duration) -> A2AResult<reqwest::Client> {
    reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(connect_timeout)
        .build()
        .map_err(|e| A2AError::Config(format!("failed to build HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_becomes_header() {
        let headers = api_key_headers(Some("secret-123")).unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get(API_KEY_HEADER).unwrap(), "secret-123");
        assert!(headers.get(API_KEY_HEADER).unwrap().is_sensitive());
    }

    #[test]
    fn missing_or_empty_key_omits_header() {
        assert!(api_key_headers(None).unwrap().is_empty());
        assert!(api_key_headers(Some("")).unwrap().is_empty());
    }

    #[test]
    fn invalid_key_is_config_error() {
        let err = api_key_headers(Some("bad\nkey")).unwrap_err();
        assert!(matches!(err, A2AError::Config(_)));
    }

    #[test]
    fn header_name_is_case_insensitive() {
        let headers = api_key_headers(Some("k")).unwrap();
        assert!(headers.contains_key("x-api-key"));
        assert!(headers.contains_key("X-API-KEY"));
    }
}
