//! REST client implementation.
//!
//! This module provides the [`RestClient`] type: paginated traversals through
//! the pagination driver, and single-shot reads and mutations that bypass it.

use serde::{de::DeserializeOwned, Serialize};

use crate::clients::{DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};
use crate::config::{BigCommerceConfig, RetryPolicy};
use crate::rest::{
    decode_page, decode_single, drive, ApiError, BodyShape, Collection, Page, QueryArgs,
};

/// REST API client for one store.
///
/// Holds only immutable configuration and the connection pool. Each
/// [`fetch_all`](Self::fetch_all) call keeps its traversal state locally.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,no_run
/// use bigcommerce_api::rest::{BodyShape, QueryArgs};
/// use bigcommerce_api::{AccessToken, BigCommerceConfig, RestClient, StoreHash};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = BigCommerceConfig::builder()
///     .store_hash(StoreHash::new("abc123")?)
///     .access_token(AccessToken::new("token")?)
///     .build()?;
/// let client = RestClient::new(&config);
///
/// let channels = client
///     .fetch_all::<serde_json::Value>("/v3/channels", &QueryArgs::new())
///     .await
///     .into_result()?;
/// println!("{} channels", channels.len());
///
/// let product: serde_json::Value = client
///     .fetch_one("/v3/catalog/products/1", BodyShape::Enveloped)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RestClient {
    http_client: HttpClient,
    retry_policy: RetryPolicy,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client from the configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be created; see
    /// [`HttpClient::new`].
    #[must_use]
    pub fn new(config: &BigCommerceConfig) -> Self {
        tracing::debug!(
            store_hash = %config.store_hash(),
            max_retries = config.retry_policy().max_retries(),
            "Creating REST client"
        );
        Self {
            http_client: HttpClient::new(config),
            retry_policy: config.retry_policy().clone(),
        }
    }

    /// Returns the retry policy used by [`fetch_all`](Self::fetch_all).
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Fetches every page of `endpoint` matching `args`.
    ///
    /// Never fails outright: the returned [`Collection`] holds the items
    /// gathered in page order and, if the traversal ended early, its error.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        args: &QueryArgs,
    ) -> Collection<T> {
        tracing::debug!(endpoint, "Starting traversal");
        drive(
            move |page| self.fetch_page::<T>(endpoint, args, page),
            &self.retry_policy,
        )
        .await
    }

    /// Fetches and decodes one page of `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NoContent`] on 204, [`ApiError::Transport`] on
    /// network failures, and the decoder's error otherwise.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        args: &QueryArgs,
        page: u32,
    ) -> Result<Page<T>, ApiError> {
        tracing::debug!(endpoint, page, "Requesting page");
        let path = args.page_path(endpoint, page);
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .build()
            .map_err(HttpError::from)?;
        let response = self.http_client.send(request).await?;
        decode_page(&response)
    }

    /// Fetches one object.
    ///
    /// `endpoint` carries its own query string, if any.
    ///
    /// # Errors
    ///
    /// Returns any [`ApiError`]; nothing is retried.
    pub async fn fetch_one<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        shape: BodyShape,
    ) -> Result<T, ApiError> {
        let request = HttpRequest::builder(HttpMethod::Get, endpoint)
            .build()
            .map_err(HttpError::from)?;
        let response = self.http_client.send(request).await?;
        decode_single(&response, shape).map_err(|e| e.for_lookup("Resource", endpoint))
    }

    /// Sends `body` as JSON with `method` and decodes the response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be serialized,
    /// [`ApiError::Validation`] on 422, and any other [`ApiError`] otherwise.
    pub async fn mutate<B, T>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: &B,
        shape: BodyShape,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body).map_err(|source| ApiError::Encode { source })?;
        self.mutate_bytes(method, endpoint, payload, shape).await
    }

    /// Sends an already-encoded JSON payload with `method` and decodes the
    /// response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] on 422 and any other [`ApiError`]
    /// otherwise.
    pub async fn mutate_bytes<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        payload: Vec<u8>,
        shape: BodyShape,
    ) -> Result<T, ApiError> {
        let response = self.send(method, endpoint, Some(payload)).await?;
        decode_single(&response, shape).map_err(|e| e.for_lookup("Resource", endpoint))
    }

    /// Deletes the resource at `endpoint`.
    ///
    /// Any 2xx status, including 204, is success.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] for non-2xx statuses.
    pub async fn delete(&self, endpoint: &str) -> Result<(), ApiError> {
        let response = self.send(HttpMethod::Delete, endpoint, None).await?;
        if response.is_ok() {
            Ok(())
        } else {
            Err(ApiError::from_http_response(&response).for_lookup("Resource", endpoint))
        }
    }

    /// Sends one request and returns the raw response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the request is invalid or the
    /// network call fails.
    pub async fn send(
        &self,
        method: HttpMethod,
        endpoint: &str,
        payload: Option<Vec<u8>>,
    ) -> Result<HttpResponse, ApiError> {
        let mut builder = HttpRequest::builder(method, endpoint);
        if let Some(payload) = payload {
            builder = builder.body(payload).body_type(DataType::Json);
        }
        let request = builder.build().map_err(HttpError::from)?;
        Ok(self.http_client.send(request).await?)
    }
}
