//! HTTP client types for BigCommerce API communication.
//!
//! # Overview
//!
//! - [`HttpClient`]: the transport, one authenticated request per call
//! - [`HttpRequest`]: a request to be sent to the API
//! - [`HttpResponse`]: a drained response with parsed headers
//! - [`HttpMethod`]: supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`DataType`]: content types for request bodies
//! - [`RateLimit`]: informational `X-Rate-Limit-*` values
//! - [`rest::RestClient`]: the higher-level REST client
//!
//! The transport does not retry and does not interpret status codes.
//! Retrying belongs to the pagination driver in [`crate::rest`].

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, RateLimit};

pub use rest::RestClient;
