//! HTTP transport for BigCommerce API communication.
//!
//! This module provides the [`HttpClient`] type, which issues exactly one
//! authenticated request per call and returns the drained response.

use std::collections::HashMap;

use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::BigCommerceConfig;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests against one store.
///
/// The client handles:
/// - Base URI construction from the store hash or `api_host`
/// - Default headers: `User-Agent`, `Accept`, `X-Auth-Token`, `X-Auth-Client`
/// - The configured request timeout
///
/// Non-2xx statuses are returned as data, never as errors, and nothing is
/// retried here.
///
/// # Example
///
/// ```rust,no_run
/// use bigcommerce_api::clients::{HttpClient, HttpMethod, HttpRequest};
/// use bigcommerce_api::{AccessToken, BigCommerceConfig, StoreHash};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = BigCommerceConfig::builder()
///     .store_hash(StoreHash::new("abc123")?)
///     .access_token(AccessToken::new("token")?)
///     .build()?;
///
/// let client = HttpClient::new(&config);
/// let request = HttpRequest::builder(HttpMethod::Get, "/v3/channels?page=1").build()?;
/// let response = client.send(request).await?;
/// println!("status {}", response.code);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_uri: String,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the configured store.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &BigCommerceConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}BigCommerce API Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "X-Auth-Token".to_string(),
            config.access_token().as_ref().to_string(),
        );
        if let Some(client_id) = config.client_id() {
            default_headers.insert("X-Auth-Client".to_string(), client_id.as_ref().to_string());
        }

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().expect("Failed to create HTTP client");

        Self {
            client,
            base_uri: config.base_uri(),
            default_headers,
        }
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends one request and drains the response body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if validation fails (no request
    /// is sent), or [`HttpError::Network`] for connection, TLS, timeout and
    /// body-read failures.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}{}", self.base_uri, request.path);

        let mut req_builder = self
            .client
            .request(request.http_method.into(), &url);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(body_type) = &request.body_type {
            req_builder = req_builder.header("Content-Type", body_type.as_content_type());
        }
        if let Some(body) = request.body {
            tracing::trace!(
                path = %request.path,
                body = %String::from_utf8_lossy(&body),
                "Request body"
            );
            req_builder = req_builder.body(body);
        }

        tracing::debug!(method = %request.http_method, path = %request.path, "Sending request");

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.bytes().await?.to_vec();

        let response = HttpResponse::new(code, headers, body);

        if let Some(limit) = &response.rate_limit {
            tracing::debug!(
                requests_left = ?limit.requests_left,
                requests_quota = ?limit.requests_quota,
                time_reset_ms = ?limit.time_reset_ms,
                "Rate limit"
            );
        }
        tracing::trace!(
            code,
            body = %response.body_text(),
            "Response body"
        );

        Ok(response)
    }

    /// Parses response headers into a `HashMap` with lowercased names.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
