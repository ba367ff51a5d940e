//! HTTP response types.
//!
//! This module provides the [`HttpResponse`] type and the informational
//! [`RateLimit`] parsed from its headers.

use std::collections::HashMap;

/// Rate limit information from the `X-Rate-Limit-*` headers.
///
/// The values are informational. Nothing in this crate waits on them.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::clients::RateLimit;
/// use std::collections::HashMap;
///
/// let mut headers = HashMap::new();
/// headers.insert("x-rate-limit-requests-left".to_string(), vec!["35".to_string()]);
/// headers.insert("x-rate-limit-requests-quota".to_string(), vec!["150".to_string()]);
///
/// let limit = RateLimit::from_headers(&headers).unwrap();
/// assert_eq!(limit.requests_left, Some(35));
/// assert_eq!(limit.requests_quota, Some(150));
/// assert_eq!(limit.time_reset_ms, None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RateLimit {
    /// Requests remaining in the current window.
    pub requests_left: Option<u64>,
    /// Requests allowed per window.
    pub requests_quota: Option<u64>,
    /// Milliseconds until the window resets.
    pub time_reset_ms: Option<u64>,
    /// Length of the window in milliseconds.
    pub time_window_ms: Option<u64>,
}

impl RateLimit {
    /// Parses the rate limit headers, returning `None` when none are present.
    #[must_use]
    pub fn from_headers(headers: &HashMap<String, Vec<String>>) -> Option<Self> {
        let number = |name: &str| {
            headers
                .get(name)
                .and_then(|values| values.first())
                .and_then(|value| value.trim().parse::<u64>().ok())
        };

        let limit = Self {
            requests_left: number("x-rate-limit-requests-left"),
            requests_quota: number("x-rate-limit-requests-quota"),
            time_reset_ms: number("x-rate-limit-time-reset-ms"),
            time_window_ms: number("x-rate-limit-time-window-ms"),
        };

        if limit == Self::default() {
            None
        } else {
            Some(limit)
        }
    }
}

/// A fully drained HTTP response.
///
/// Header names are lowercased. The body is kept as raw bytes; decoding is
/// left to [`crate::rest::envelope`].
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: Vec<u8>,
    /// Rate limit information, if the server sent any.
    pub rate_limit: Option<RateLimit>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the rate limit headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<Vec<u8>>) -> Self {
        let rate_limit = RateLimit::from_headers(&headers);
        Self {
            code,
            headers,
            body: body.into(),
            rate_limit,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the body as UTF-8 text, replacing invalid sequences.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
