//! Error types for the auth context exchange.
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_api::auth::{AuthError, OAuthErrorCode};
//!
//! let error = AuthError::OAuth {
//!     code: OAuthErrorCode::InvalidGrant,
//!     description: Some("code already used".to_string()),
//! };
//! assert_eq!(error.to_string(), "OAuth error invalid_grant: code already used");
//! ```

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::error::ConfigError;

/// Errors from [`get_auth_context`](crate::auth::get_auth_context).
#[derive(Debug, Error)]
pub enum AuthError {
    /// The install callback query is missing a parameter.
    #[error("Invalid callback: {reason}")]
    InvalidCallback {
        /// What is missing or malformed.
        reason: String,
    },

    /// The login service rejected the exchange with an OAuth error body.
    #[error("OAuth error {code}{}", suffix(.description.as_deref()))]
    OAuth {
        /// The `error` member of the response.
        code: OAuthErrorCode,
        /// The `error_description` member, if any.
        description: Option<String>,
    },

    /// The login service answered non-2xx without an OAuth error body.
    #[error("Token exchange failed with status {status}: {message}")]
    TokenExchangeFailed {
        /// The HTTP status code.
        status: u16,
        /// The response body.
        message: String,
    },

    /// The request could not be sent or its response could not be read.
    #[error("Token exchange request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx response did not have the expected structure.
    #[error("Failed to decode token response: {source}")]
    Decode {
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The response held values that cannot form a valid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn suffix(description: Option<&str>) -> String {
    description.map(|d| format!(": {d}")).unwrap_or_default()
}

/// The `error` code of an OAuth error response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum OAuthErrorCode {
    InvalidRequest,
    InvalidClient,
    InvalidGrant,
    UnauthorizedClient,
    UnsupportedGrantType,
    InvalidScope,
    /// Any code not listed above, verbatim.
    Other(String),
}

impl OAuthErrorCode {
    /// Returns the wire form of the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::InvalidClient => "invalid_client",
            Self::InvalidGrant => "invalid_grant",
            Self::UnauthorizedClient => "unauthorized_client",
            Self::UnsupportedGrantType => "unsupported_grant_type",
            Self::InvalidScope => "invalid_scope",
            Self::Other(code) => code,
        }
    }
}

impl From<String> for OAuthErrorCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "invalid_request" => Self::InvalidRequest,
            "invalid_client" => Self::InvalidClient,
            "invalid_grant" => Self::InvalidGrant,
            "unauthorized_client" => Self::UnauthorizedClient,
            "unsupported_grant_type" => Self::UnsupportedGrantType,
            "invalid_scope" => Self::InvalidScope,
            _ => Self::Other(code),
        }
    }
}

impl fmt::Display for OAuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};
