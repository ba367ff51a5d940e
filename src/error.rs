//! Error types for client configuration.
//!
//! This module contains error types used when building configuration and
//! validating credential newtypes.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_api::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid BigCommerce API access token.")]
    EmptyAccessToken,

    /// Client ID cannot be empty.
    #[error("Client ID cannot be empty. Please provide the client ID of your API account or app.")]
    EmptyClientId,

    /// Client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide the client secret of your app.")]
    EmptyClientSecret,

    /// Store hash is invalid.
    #[error("Invalid store hash '{hash}'. Expected the alphanumeric hash from 'stores/{{hash}}'.")]
    InvalidStoreHash {
        /// The invalid hash that was provided.
        hash: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.bigcommerce.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}
