//! Error types for REST API operations.
//!
//! Every failure of a page fetch, single-shot read or mutation is reported as
//! an [`ApiError`]. Error bodies are classified by status and shape:
//!
//! - **204**: [`ApiError::NoContent`], the "zero results" sentinel
//! - **422**: [`ApiError::Validation`] built from the `errors` member
//! - **Envelope with `status`/`title`**: [`ApiError::Remote`]
//! - **404 without envelope**: [`ApiError::NotFound`]
//! - **Anything else**: [`ApiError::Response`]
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_api::rest::{ApiError, ValidationError};
//! use serde_json::json;
//!
//! let error = ValidationError::from_body(
//!     &serde_json::to_vec(&json!({"errors": {"sku": "already exists"}})).unwrap(),
//!     None,
//! );
//! assert_eq!(error.to_string(), "already exists");
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::clients::{HttpError, HttpResponse, HttpResponseError};

/// Errors from REST API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or its response could not be read.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The server answered 204 No Content.
    #[error("no content")]
    NoContent,

    /// The response body did not have the expected structure.
    #[error("failed to decode response: {source}")]
    Decode {
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A request payload could not be serialized.
    #[error("failed to encode request: {source}")]
    Encode {
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The API reported an application-level error.
    #[error("{title}")]
    Remote {
        /// The `status` member of the error envelope.
        status: i64,
        /// The `title` member of the error envelope.
        title: String,
    },

    /// The API rejected a mutation (HTTP 422).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The resource does not exist.
    #[error("{resource} {key} not found")]
    NotFound {
        /// The kind of resource (e.g., "Product").
        resource: &'static str,
        /// The id, SKU or path that was looked up.
        key: String,
    },

    /// Any other unexpected HTTP status.
    #[error(transparent)]
    Response(#[from] HttpResponseError),
}

impl ApiError {
    /// Classifies a non-2xx response.
    #[must_use]
    pub fn from_http_response(response: &HttpResponse) -> Self {
        if response.code == 422 {
            return Self::Validation(ValidationError::from_body(
                &response.body,
                response.request_id(),
            ));
        }

        if let Some(envelope) = ErrorEnvelope::parse(&response.body) {
            if envelope.status != 0 || !envelope.title.is_empty() {
                let status = if envelope.status == 0 {
                    i64::from(response.code)
                } else {
                    envelope.status
                };
                return Self::Remote {
                    status,
                    title: envelope.title,
                };
            }
        }

        if response.code == 404 {
            return Self::NotFound {
                resource: "Resource",
                key: "unknown".to_string(),
            };
        }

        let body = response.body_text();
        let message = if body.trim().is_empty() {
            format!("unexpected status {}", response.code)
        } else {
            body
        };
        Self::Response(HttpResponseError {
            code: response.code,
            message,
            error_reference: response.request_id().map(ToString::to_string),
        })
    }

    /// Names the lookup behind a generic [`ApiError::NotFound`].
    #[must_use]
    pub(crate) fn for_lookup(self, resource: &'static str, key: impl Into<String>) -> Self {
        match self {
            Self::NotFound { .. } => Self::NotFound {
                resource,
                key: key.into(),
            },
            other => other,
        }
    }

    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Validation(e) => e.request_id.as_deref(),
            Self::Response(e) => e.error_reference.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` for the 204 sentinel.
    #[must_use]
    pub const fn is_no_content(&self) -> bool {
        matches!(self, Self::NoContent)
    }
}

/// Field-level validation messages from a 422 response.
///
/// `Display` joins every message with `", "`, ordered by field name. With no
/// messages the envelope title is shown, else `"unknown error"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", self.message())]
pub struct ValidationError {
    /// Messages keyed by field. Bare lists and strings are keyed `base`.
    pub errors: BTreeMap<String, Vec<String>>,
    /// The envelope title, if the body had one.
    pub title: Option<String>,
    /// The request ID for debugging (from the `X-Request-Id` header).
    pub request_id: Option<String>,
}

impl ValidationError {
    /// Builds a validation error from a 422 response body.
    #[must_use]
    pub fn from_body(body: &[u8], request_id: Option<&str>) -> Self {
        let envelope = ErrorEnvelope::parse(body).unwrap_or_default();
        let title = Some(envelope.title).filter(|t| !t.is_empty());
        let errors = envelope.errors.map(ErrorDetails::into_map).unwrap_or_default();

        Self {
            errors,
            title,
            request_id: request_id.map(ToString::to_string),
        }
    }

    /// Returns all messages in field order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.values().flatten().map(String::as_str)
    }

    /// Returns the display message.
    #[must_use]
    pub fn message(&self) -> String {
        let joined = self.messages().collect::<Vec<_>>().join(", ");
        if !joined.is_empty() {
            return joined;
        }
        self.title
            .clone()
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

/// The error body returned by the API.
///
/// v3 endpoints answer with an object; v2 endpoints answer with a list of
/// `{status, message}` objects, of which the first one is used.
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    status: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    errors: Option<ErrorDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Envelope(ErrorEnvelope),
    Legacy(Vec<LegacyError>),
}

#[derive(Debug, Deserialize)]
struct LegacyError {
    #[serde(default)]
    status: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetails {
    Fields(BTreeMap<String, FieldMessages>),
    List(Vec<String>),
    Message(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldMessages {
    One(String),
    Many(Vec<String>),
    Other(serde_json::Value),
}

impl ErrorEnvelope {
    fn parse(body: &[u8]) -> Option<Self> {
        match serde_json::from_slice::<ErrorBody>(body).ok()? {
            ErrorBody::Envelope(envelope) => Some(envelope),
            ErrorBody::Legacy(list) => list.into_iter().next().map(|first| Self {
                status: first.status,
                title: first.message,
                errors: None,
            }),
        }
    }
}

impl ErrorDetails {
    fn into_map(self) -> BTreeMap<String, Vec<String>> {
        let mut result = BTreeMap::new();
        match self {
            Self::Fields(fields) => {
                for (field, messages) in fields {
                    let messages = match messages {
                        FieldMessages::One(message) => vec![message],
                        FieldMessages::Many(list) => list,
                        FieldMessages::Other(value) => vec![value.to_string()],
                    };
                    result.insert(field, messages);
                }
            }
            Self::List(list) if !list.is_empty() => {
                result.insert("base".to_string(), list);
            }
            Self::List(_) => {}
            Self::Message(message) => {
                result.insert("base".to_string(), vec![message]);
            }
        }
        result
    }
}

// Verify ApiError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};
