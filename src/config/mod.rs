//! Configuration types for the BigCommerce API client.
//!
//! # Overview
//!
//! - [`BigCommerceConfig`]: store credentials and client behavior for API calls
//! - [`BigCommerceConfigBuilder`]: a builder for [`BigCommerceConfig`]
//! - [`AppConfig`]: app credentials for the OAuth auth-context exchange
//! - [`RetryPolicy`] and [`RetryMode`]: how paginated traversals tolerate failures
//! - [`StoreHash`], [`AccessToken`], [`ClientId`], [`ClientSecret`], [`HostUrl`]:
//!   validated newtypes
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_api::{AccessToken, BigCommerceConfig, ClientId, StoreHash};
//!
//! let config = BigCommerceConfig::builder()
//!     .store_hash(StoreHash::new("abc123").unwrap())
//!     .access_token(AccessToken::new("token").unwrap())
//!     .client_id(ClientId::new("client").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_uri(), "https://api.bigcommerce.com/stores/abc123");
//! ```

mod newtypes;
mod retry;

pub use newtypes::{AccessToken, ClientId, ClientSecret, HostUrl, StoreHash};
pub use retry::{RetryMode, RetryPolicy};

use crate::error::ConfigError;
use std::time::Duration;

/// Default API host.
pub const DEFAULT_API_HOST: &str = "https://api.bigcommerce.com";

/// Default OAuth login host.
pub const DEFAULT_LOGIN_URL: &str = "https://login.bigcommerce.com";

/// Configuration for calls against one store.
///
/// Built once and never mutated. `BigCommerceConfig` is `Clone`, `Send` and
/// `Sync`.
#[derive(Clone, Debug)]
pub struct BigCommerceConfig {
    store_hash: StoreHash,
    access_token: AccessToken,
    client_id: Option<ClientId>,
    api_host: Option<HostUrl>,
    retry_policy: RetryPolicy,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl BigCommerceConfig {
    /// Creates a new builder for constructing a `BigCommerceConfig`.
    #[must_use]
    pub fn builder() -> BigCommerceConfigBuilder {
        BigCommerceConfigBuilder::new()
    }

    /// Returns the store hash.
    #[must_use]
    pub const fn store_hash(&self) -> &StoreHash {
        &self.store_hash
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the client ID, if configured.
    #[must_use]
    pub const fn client_id(&self) -> Option<&ClientId> {
        self.client_id.as_ref()
    }

    /// Returns the API host override, if configured.
    #[must_use]
    pub const fn api_host(&self) -> Option<&HostUrl> {
        self.api_host.as_ref()
    }

    /// Returns the retry policy for paginated traversals.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the base URI every request path is appended to.
    ///
    /// This is `{api_host}/stores/{store_hash}`, where `api_host` defaults to
    /// [`DEFAULT_API_HOST`].
    #[must_use]
    pub fn base_uri(&self) -> String {
        let host = self
            .api_host
            .as_ref()
            .map_or(DEFAULT_API_HOST, AsRef::as_ref);
        format!("{host}/stores/{}", self.store_hash)
    }
}

// Verify BigCommerceConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BigCommerceConfig>();
    assert_send_sync::<AppConfig>();
};

/// Builder for [`BigCommerceConfig`].
///
/// `store_hash` and `access_token` are required.
///
/// # Defaults
///
/// - `client_id`: `None` (no `X-Auth-Client` header)
/// - `api_host`: [`DEFAULT_API_HOST`]
/// - `retry_policy`: [`RetryPolicy::default`]
/// - `timeout`: `None`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct BigCommerceConfigBuilder {
    store_hash: Option<StoreHash>,
    access_token: Option<AccessToken>,
    client_id: Option<ClientId>,
    api_host: Option<HostUrl>,
    retry_policy: Option<RetryPolicy>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl BigCommerceConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the store hash (required).
    #[must_use]
    pub fn store_hash(mut self, hash: StoreHash) -> Self {
        self.store_hash = Some(hash);
        self
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the client ID sent as `X-Auth-Client`.
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Overrides the API host, e.g. for a proxy or a local mock server.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Sets the retry policy for paginated traversals.
    #[must_use]
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Shorthand for a default [`RetryPolicy`] with the given budget.
    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.retry_policy = Some(RetryPolicy::new(max_retries));
        self
    }

    /// Sets the timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`BigCommerceConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `store_hash` or
    /// `access_token` are not set.
    pub fn build(self) -> Result<BigCommerceConfig, ConfigError> {
        let store_hash = self.store_hash.ok_or(ConfigError::MissingRequiredField {
            field: "store_hash",
        })?;
        let access_token = self
            .access_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "access_token",
            })?;

        Ok(BigCommerceConfig {
            store_hash,
            access_token,
            client_id: self.client_id,
            api_host: self.api_host,
            retry_policy: self.retry_policy.unwrap_or_default(),
            timeout: self.timeout,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

/// App credentials for exchanging an install callback for an access token.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::{AppConfig, ClientId, ClientSecret};
///
/// let app = AppConfig::builder()
///     .client_id(ClientId::new("client").unwrap())
///     .client_secret(ClientSecret::new("secret").unwrap())
///     .app_host("myapp.example.com")
///     .build()
///     .unwrap();
///
/// assert_eq!(app.redirect_uri(), "https://myapp.example.com/auth");
/// ```
#[derive(Clone, Debug)]
pub struct AppConfig {
    client_id: ClientId,
    client_secret: ClientSecret,
    app_host: String,
    login_url: HostUrl,
}

impl AppConfig {
    /// Creates a new builder for constructing an `AppConfig`.
    #[must_use]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Returns the app's client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the app's client secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the app's hostname.
    #[must_use]
    pub fn app_host(&self) -> &str {
        &self.app_host
    }

    /// Returns the OAuth login host.
    #[must_use]
    pub const fn login_url(&self) -> &HostUrl {
        &self.login_url
    }

    /// Returns the redirect URI registered for the app.
    #[must_use]
    pub fn redirect_uri(&self) -> String {
        format!("https://{}/auth", self.app_host)
    }
}

/// Builder for [`AppConfig`].
///
/// `client_id`, `client_secret` and `app_host` are required. `login_url`
/// defaults to [`DEFAULT_LOGIN_URL`].
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    app_host: Option<String>,
    login_url: Option<HostUrl>,
}

impl AppConfigBuilder {
    /// Sets the client ID (required).
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the client secret (required).
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Sets the app's hostname, without scheme (required).
    #[must_use]
    pub fn app_host(mut self, host: impl Into<String>) -> Self {
        self.app_host = Some(host.into());
        self
    }

    /// Overrides the OAuth login host.
    #[must_use]
    pub fn login_url(mut self, url: HostUrl) -> Self {
        self.login_url = Some(url);
        self
    }

    /// Builds the [`AppConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if a required field is
    /// not set, or [`ConfigError::InvalidHostUrl`] if the default login URL
    /// cannot be parsed.
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let client_secret = self
            .client_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "client_secret",
            })?;
        let app_host = self
            .app_host
            .filter(|host| !host.trim().is_empty())
            .ok_or(ConfigError::MissingRequiredField { field: "app_host" })?;
        let login_url = match self.login_url {
            Some(url) => url,
            None => HostUrl::new(DEFAULT_LOGIN_URL)?,
        };

        Ok(AppConfig {
            client_id,
            client_secret,
            app_host,
            login_url,
        })
    }
}
