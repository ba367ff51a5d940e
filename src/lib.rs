//! # BigCommerce API Rust Client
//!
//! A Rust client for the BigCommerce REST API: typed configuration, an
//! authenticated transport, a pagination driver with a bounded retry policy,
//! resource adapters for the catalog, channels, checkouts, gift certificates
//! and tax, and the app-install auth exchange.
//!
//! ## Overview
//!
//! - Type-safe configuration via [`BigCommerceConfig`] and [`AppConfig`]
//! - Validated newtypes for credentials and hosts
//! - [`RestClient`] with `fetch_all`, `fetch_page`, `fetch_one`, `mutate`
//!   and `delete`
//! - [`Collection<T>`]: traversal results that keep partial items when a
//!   traversal ends early
//! - Resource adapters under [`rest::resources`]
//! - Install-callback token exchange via [`get_auth_context`]
//!
//! ## Quick Start
//!
//! ```rust
//! use bigcommerce_api::{AccessToken, BigCommerceConfig, RetryMode, RetryPolicy, StoreHash};
//!
//! let config = BigCommerceConfig::builder()
//!     .store_hash(StoreHash::new("abc123").unwrap())
//!     .access_token(AccessToken::new("token").unwrap())
//!     .retry_policy(RetryPolicy::new(5).with_mode(RetryMode::RetryPage))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_uri(), "https://api.bigcommerce.com/stores/abc123");
//! ```
//!
//! ## Listing a Collection
//!
//! ```rust,ignore
//! use bigcommerce_api::rest::resources::Product;
//! use bigcommerce_api::rest::{CollectionResource, QueryArgs};
//! use bigcommerce_api::RestClient;
//!
//! let client = RestClient::new(&config);
//! let products = Product::all(&client, &QueryArgs::new().limit(250)).await;
//!
//! match products.error() {
//!     None => println!("{} products", products.len()),
//!     Some(error) => println!("{} products before: {error}", products.len()),
//! }
//! ```
//!
//! ## App Installation
//!
//! ```rust,ignore
//! use bigcommerce_api::{get_auth_context, AppConfig, ClientId, ClientSecret, RestClient};
//!
//! let app = AppConfig::builder()
//!     .client_id(ClientId::new("client-id")?)
//!     .client_secret(ClientSecret::new("client-secret")?)
//!     .app_host("app.example.com")
//!     .build()?;
//!
//! let context = get_auth_context(&app, callback_query).await?;
//! let client = RestClient::new(&context.to_config()?);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration and query arguments are passed explicitly
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **Thread-safe**: clients and configuration are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{
    AccessToken, AppConfig, AppConfigBuilder, BigCommerceConfig, BigCommerceConfigBuilder,
    ClientId, ClientSecret, HostUrl, RetryMode, RetryPolicy, StoreHash,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, RateLimit, RestClient,
};

// Re-export REST core types
pub use rest::{ApiError, Collection, CollectionResource, QueryArgs, ValidationError};

// Re-export auth types
pub use auth::{get_auth_context, AuthContext, AuthError};
