//! REST core: envelope decoding, pagination and resource adapters.
//!
//! # Overview
//!
//! - [`envelope`]: decodes page envelopes and single-object bodies
//! - [`drive`]: the pagination driver with its bounded retry policy
//! - [`Collection<T>`]: the items of a traversal plus its terminal error
//! - [`QueryArgs`]: immutable query arguments passed per call
//! - [`ApiError`] and [`ValidationError`]: the uniform error type
//! - [`CollectionResource`]: `all()`, `page()` and `find()` for paginated resources
//! - [`resources`]: products, variants, channels, checkouts, gift certificates
//!   and tax
//!
//! # Example
//!
//! ```rust,ignore
//! use bigcommerce_api::rest::resources::Product;
//! use bigcommerce_api::rest::{CollectionResource, QueryArgs};
//!
//! let products = Product::all(&client, &QueryArgs::new().arg("is_visible", true)).await;
//! if let Some(error) = products.error() {
//!     eprintln!("stopped early after {} products: {error}", products.len());
//! }
//! for product in products.iter() {
//!     println!("{} {}", product.sku, product.name);
//! }
//! ```

pub mod envelope;
mod errors;
mod pagination;
mod query;
mod resource;
mod response;

pub mod resources;

pub use envelope::{decode_page, decode_single, BodyShape, Page, Pagination};
pub use errors::{ApiError, ValidationError};
pub use pagination::drive;
pub use query::QueryArgs;
pub use resource::CollectionResource;
pub use response::Collection;
