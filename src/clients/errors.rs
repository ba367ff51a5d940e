//! HTTP-specific error types.
//!
//! - [`HttpResponseError`]: an unexpected non-2xx response, kept as data
//! - [`InvalidHttpRequestError`]: a request that failed validation before sending
//! - [`HttpError`]: the transport error, returned by [`HttpClient::send`]
//!
//! The transport never turns a status code into an error on its own. Status
//! classification happens in the envelope decoder, which may produce an
//! [`HttpResponseError`] for statuses it has no better kind for.
//!
//! [`HttpClient::send`]: crate::clients::HttpClient::send

use thiserror::Error;

/// An unexpected HTTP status, with whatever the body said about it.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 503,
///     message: "Service Unavailable".to_string(),
///     error_reference: Some("abc-123".to_string()),
/// };
///
/// assert_eq!(error.to_string(), "HTTP 503: Service Unavailable");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response body, or a short description if the body was empty.
    pub message: String,
    /// Reference ID for error reporting (from the `X-Request-Id` header).
    pub error_reference: Option<String>,
}

/// A request that failed validation before any network traffic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The path does not start with `/`.
    #[error("Request path '{path}' must start with '/'.")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },

    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Errors from a single transport call.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network, TLS, timeout or body-read failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns `true` if the request was aborted by the configured timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network(e) if e.is_timeout())
    }
}
