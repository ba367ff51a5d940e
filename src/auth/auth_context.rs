//! Authorization-code exchange for app installs.
//!
//! When a merchant installs an app, BigCommerce redirects to the app's
//! `/auth` callback with `code`, `scope` and `context` query parameters.
//! [`get_auth_context`] trades them for a permanent store access token.
//!
//! # Example
//!
//! ```rust,ignore
//! use bigcommerce_api::auth::get_auth_context;
//! use bigcommerce_api::{AppConfig, ClientId, ClientSecret, RestClient};
//!
//! let app = AppConfig::builder()
//!     .client_id(ClientId::new("client-id")?)
//!     .client_secret(ClientSecret::new("client-secret")?)
//!     .app_host("app.example.com")
//!     .build()?;
//!
//! // `query` is the raw query string of the install callback
//! let context = get_auth_context(&app, query).await?;
//! let client = RestClient::new(&context.to_config()?);
//! ```

use serde::{Deserialize, Serialize};

use crate::auth::{AuthError, OAuthErrorCode};
use crate::config::{AccessToken, AppConfig, BigCommerceConfig, ClientId, StoreHash};
use crate::error::ConfigError;

const GRANT_TYPE: &str = "authorization_code";

/// A user as reported by the token endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: u64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// The result of a successful exchange.
///
/// The access token is masked in `Debug` output.
#[derive(Clone, Debug)]
pub struct AuthContext {
    /// The store's permanent access token.
    pub access_token: AccessToken,
    /// Space-separated granted scopes.
    pub scope: String,
    /// The user who installed the app.
    pub user: AuthUser,
    /// The store owner, when reported.
    pub owner: Option<AuthUser>,
    /// The store context, `stores/{hash}`.
    pub context: String,
    /// The account UUID, when reported.
    pub account_uuid: Option<String>,
    client_id: ClientId,
}

impl AuthContext {
    /// Returns the store hash from [`context`](Self::context).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStoreHash`] if the context does not hold
    /// a valid hash.
    pub fn store_hash(&self) -> Result<StoreHash, ConfigError> {
        StoreHash::new(self.context.as_str())
    }

    /// Builds the REST configuration for the installed store.
    ///
    /// The app's client id is sent as `X-Auth-Client`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the context does not hold a valid hash.
    pub fn to_config(&self) -> Result<BigCommerceConfig, ConfigError> {
        BigCommerceConfig::builder()
            .store_hash(self.store_hash()?)
            .access_token(self.access_token.clone())
            .client_id(self.client_id.clone())
            .build()
    }
}

/// Parameters of the install callback.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallbackQuery {
    pub code: String,
    pub scope: String,
    pub context: String,
}

impl CallbackQuery {
    /// Parses a callback query string, with or without the leading `?`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCallback`] if `code` or `context` is
    /// missing or empty.
    pub fn parse(query: &str) -> Result<Self, AuthError> {
        let mut parsed = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(value)?;
            match key {
                "code" => parsed.code = value,
                "scope" => parsed.scope = value,
                "context" => parsed.context = value,
                _ => {}
            }
        }

        if parsed.code.is_empty() {
            return Err(missing("code"));
        }
        if parsed.context.is_empty() {
            return Err(missing("context"));
        }
        Ok(parsed)
    }
}

fn missing(parameter: &str) -> AuthError {
    AuthError::InvalidCallback {
        reason: format!("missing '{parameter}' parameter"),
    }
}

fn decode_component(value: &str) -> Result<String, AuthError> {
    let value = value.replace('+', " ");
    urlencoding::decode(&value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| AuthError::InvalidCallback {
            reason: format!("malformed parameter: {e}"),
        })
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: String,
    grant_type: &'a str,
    code: &'a str,
    scope: &'a str,
    context: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    scope: String,
    #[serde(default)]
    user: AuthUser,
    #[serde(default)]
    owner: Option<AuthUser>,
    #[serde(default)]
    context: String,
    #[serde(default)]
    account_uuid: Option<String>,
}

#[derive(Deserialize)]
struct OAuthErrorBody {
    error: OAuthErrorCode,
    #[serde(default)]
    error_description: Option<String>,
}

/// Exchanges the install callback's authorization code for an access token.
///
/// POSTs to `{login_url}/oauth2/token`. A response carrying an `error`
/// member is reported as [`AuthError::OAuth`] whatever its status.
///
/// # Errors
///
/// - [`AuthError::InvalidCallback`] if `code` or `context` is missing
/// - [`AuthError::OAuth`] if the login service returns an OAuth error
/// - [`AuthError::TokenExchangeFailed`] on any other non-2xx response
/// - [`AuthError::Network`] if the request fails
/// - [`AuthError::Decode`] if a 2xx body is not a token response
pub async fn get_auth_context(
    app: &AppConfig,
    callback_query: &str,
) -> Result<AuthContext, AuthError> {
    let callback = CallbackQuery::parse(callback_query)?;
    let token_url = format!("{}/oauth2/token", app.login_url().as_ref());
    tracing::debug!(context = %callback.context, url = %token_url, "Exchanging authorization code");

    let body = TokenRequest {
        client_id: app.client_id().as_ref(),
        client_secret: app.client_secret().as_ref(),
        redirect_uri: app.redirect_uri(),
        grant_type: GRANT_TYPE,
        code: &callback.code,
        scope: &callback.scope,
        context: &callback.context,
    };

    let response = reqwest::Client::new()
        .post(&token_url)
        .json(&body)
        .send()
        .await?;
    let status = response.status();
    let bytes = response.bytes().await?;

    if let Ok(error) = serde_json::from_slice::<OAuthErrorBody>(&bytes) {
        tracing::warn!(status = status.as_u16(), code = %error.error, "Token exchange rejected");
        return Err(AuthError::OAuth {
            code: error.error,
            description: error.error_description,
        });
    }

    if !status.is_success() {
        return Err(AuthError::TokenExchangeFailed {
            status: status.as_u16(),
            message: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }

    let token: TokenResponse =
        serde_json::from_slice(&bytes).map_err(|source| AuthError::Decode { source })?;

    Ok(AuthContext {
        access_token: AccessToken::new(token.access_token)?,
        scope: token.scope,
        user: token.user,
        owner: token.owner,
        context: token.context,
        account_uuid: token.account_uuid,
        client_id: app.client_id().clone(),
    })
}
