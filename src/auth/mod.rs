//! App installation auth.
//!
//! - [`get_auth_context`]: exchanges an install callback for an access token
//! - [`AuthContext`]: the exchange result, convertible to a
//!   [`BigCommerceConfig`](crate::BigCommerceConfig)
//! - [`AuthError`] and [`OAuthErrorCode`]: exchange failures
//!
//! The app itself is described by an [`AppConfig`](crate::AppConfig).

mod auth_context;
mod error;

pub use auth_context::{get_auth_context, AuthContext, AuthUser, CallbackQuery};
pub use error::{AuthError, OAuthErrorCode};
