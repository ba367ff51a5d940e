//! The collection resource trait.
//!
//! Resources listed through a paginated v3 endpoint implement
//! [`CollectionResource`] and get `all()`, `page()` and `find()` for free.
//!
//! # Implementing a Resource
//!
//! 1. Define a struct with serde derives, optional fields skipped when `None`
//! 2. Implement `CollectionResource` with `NAME` and `COLLECTION_PATH`
//!
//! ```rust,ignore
//! use bigcommerce_api::rest::CollectionResource;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Brand {
//!     pub id: Option<u64>,
//!     pub name: String,
//! }
//!
//! impl CollectionResource for Brand {
//!     const NAME: &'static str = "Brand";
//!     const COLLECTION_PATH: &'static str = "/v3/catalog/brands";
//! }
//!
//! let brands = Brand::all(&client, &QueryArgs::new()).await;
//! ```

use std::fmt::Display;

use serde::{de::DeserializeOwned, Serialize};

use crate::clients::RestClient;
use crate::rest::{ApiError, BodyShape, Collection, Page, QueryArgs};

/// A resource listed through a paginated collection endpoint.
///
/// # Required Bounds
///
/// Resources must be serializable, deserializable, cloneable, and thread-safe.
#[allow(async_fn_in_trait)]
pub trait CollectionResource: Serialize + DeserializeOwned + Clone + Send + Sync + Sized {
    /// The singular name of the resource (e.g., "Product"), used in errors.
    const NAME: &'static str;

    /// The collection endpoint (e.g., "/v3/catalog/products").
    const COLLECTION_PATH: &'static str;

    /// Returns the path of one member of the collection.
    #[must_use]
    fn member_path(id: impl Display) -> String {
        format!("{}/{id}", Self::COLLECTION_PATH)
    }

    /// Fetches every page of the collection matching `args`.
    ///
    /// The returned [`Collection`] carries the partial items and the error
    /// when the traversal ended early.
    async fn all(client: &RestClient, args: &QueryArgs) -> Collection<Self> {
        client.fetch_all(Self::COLLECTION_PATH, args).await
    }

    /// Fetches one page of the collection.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the page request, without retries.
    async fn page(client: &RestClient, args: &QueryArgs, page: u32) -> Result<Page<Self>, ApiError> {
        client.fetch_page(Self::COLLECTION_PATH, args, page).await
    }

    /// Fetches one member by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] naming this resource when the server
    /// answers 404 without an error envelope, and any other [`ApiError`] from
    /// the request.
    async fn find(client: &RestClient, id: u64, args: &QueryArgs) -> Result<Self, ApiError> {
        let path = args.apply_to(&Self::member_path(id));
        client
            .fetch_one(&path, BodyShape::Enveloped)
            .await
            .map_err(|e| e.for_lookup(Self::NAME, id.to_string()))
    }
}
