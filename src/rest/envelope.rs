//! Response envelope decoding.
//!
//! v3 collection endpoints wrap their items as
//!
//! ```json
//! {
//!   "data": [ ... ],
//!   "meta": { "pagination": { "current_page": 1, "total_pages": 3, ... } }
//! }
//! ```
//!
//! and report API-level failures through a nonzero `status` with a `title`.
//! [`decode_page`] turns one such response into a [`Page`], and
//! [`decode_single`] handles single-object reads and mutation results.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::clients::HttpResponse;
use crate::rest::ApiError;

/// Pagination metadata from `meta.pagination`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// Total number of items across all pages.
    pub total: u64,
    /// Number of items on this page.
    pub count: u64,
    /// Page size.
    pub per_page: u64,
    /// This page's number, starting at 1.
    pub current_page: u32,
    /// Number of pages.
    pub total_pages: u32,
}

impl Pagination {
    /// Returns `true` while pages remain after this one.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Envelope metadata.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Meta {
    /// Pagination state, all zeros when absent.
    #[serde(default)]
    pub pagination: Pagination,
}

/// The decoded shape of a page response before its items are typed.
///
/// Items stay as raw JSON until `status` is known to be zero, so an error
/// envelope with unexpected `data` still surfaces its `title`.
#[derive(Debug, Default, Deserialize)]
pub struct PageEnvelope {
    /// API-level status; absent means 0.
    #[serde(default)]
    pub status: i64,
    /// Error message when `status` is nonzero.
    #[serde(default)]
    pub title: String,
    /// The page items.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Pagination metadata.
    #[serde(default)]
    pub meta: Meta,
}

/// One decoded page of a collection.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    /// Items in server order.
    pub items: Vec<T>,
    /// Pagination metadata as reported.
    pub pagination: Pagination,
    /// Whether another page follows.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Builds a page, deriving `has_more` from the pagination metadata.
    #[must_use]
    pub const fn new(items: Vec<T>, pagination: Pagination) -> Self {
        let has_more = pagination.has_more();
        Self {
            items,
            pagination,
            has_more,
        }
    }
}

/// How a single-object response body is laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyShape {
    /// `{"data": T}`, used by v3 endpoints.
    Enveloped,
    /// A bare `T`, used by v2 endpoints.
    Bare,
}

/// Decodes one page response.
///
/// # Errors
///
/// - [`ApiError::NoContent`] on 204
/// - the classified error for any other non-2xx status
/// - [`ApiError::Decode`] if the body is not a page envelope
/// - [`ApiError::Remote`] if the envelope carries a nonzero `status`
pub fn decode_page<T: DeserializeOwned>(response: &HttpResponse) -> Result<Page<T>, ApiError> {
    if response.code == 204 {
        return Err(ApiError::NoContent);
    }
    if !response.is_ok() {
        return Err(ApiError::from_http_response(response));
    }

    let envelope: PageEnvelope =
        serde_json::from_slice(&response.body).map_err(|source| ApiError::Decode { source })?;

    if envelope.status != 0 {
        return Err(ApiError::Remote {
            status: envelope.status,
            title: envelope.title,
        });
    }

    let items = match envelope.data {
        None | Some(serde_json::Value::Null) => Vec::new(),
        Some(data) => {
            serde_json::from_value(data).map_err(|source| ApiError::Decode { source })?
        }
    };

    Ok(Page::new(items, envelope.meta.pagination))
}

/// Decodes a single-object response.
///
/// # Errors
///
/// - [`ApiError::NoContent`] on 204
/// - [`ApiError::Validation`] on 422, and the classified error for any other
///   non-2xx status
/// - [`ApiError::Decode`] if the body does not match `shape` and `T`
pub fn decode_single<T: DeserializeOwned>(
    response: &HttpResponse,
    shape: BodyShape,
) -> Result<T, ApiError> {
    if response.code == 204 {
        return Err(ApiError::NoContent);
    }
    if !response.is_ok() {
        return Err(ApiError::from_http_response(response));
    }

    let decoded = match shape {
        BodyShape::Enveloped => {
            serde_json::from_slice::<DataEnvelope<T>>(&response.body).map(|e| e.data)
        }
        BodyShape::Bare => serde_json::from_slice::<T>(&response.body),
    };
    decoded.map_err(|source| ApiError::Decode { source })
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}
