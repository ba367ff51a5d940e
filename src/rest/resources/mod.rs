//! Resource adapters.
//!
//! Each adapter pairs a canonical struct with the endpoints that read and
//! write it. Optional fields cover both full records and partial payloads.
//!
//! | Resource | Endpoint | Body shape |
//! |----------|----------|------------|
//! | [`Product`] | `/v3/catalog/products` | enveloped |
//! | [`Variant`] | `/v3/catalog/variants` | enveloped |
//! | [`Channel`] | `/v3/channels` | enveloped |
//! | [`Checkout`] | `/v3/checkouts/{id}` | enveloped |
//! | [`TaxZone`], [`TaxClassRate`] | `/v3/tax/zones`, `/v3/tax/rates` | enveloped |
//! | [`GiftCertificate`] | `/v2/gift_certificates` | bare |
//!
//! [`Product`], [`Variant`] and [`Channel`] implement
//! [`CollectionResource`](crate::rest::CollectionResource), so their lists
//! go through the pagination driver.
//!
//! # Example
//!
//! ```rust,ignore
//! use bigcommerce_api::rest::resources::{Channel, Product};
//! use bigcommerce_api::rest::{CollectionResource, QueryArgs};
//!
//! let channels = Channel::all(&client, &QueryArgs::new()).await.into_result()?;
//! for channel in &channels {
//!     Product::add_to_channel(&client, 42, channel.id.unwrap_or_default()).await?;
//! }
//! ```

use crate::rest::ApiError;

mod channel;
mod checkout;
mod gift_certificate;
mod product;
mod tax;
mod variant;

pub use channel::Channel;
pub use checkout::{Address, Cart, Checkout, Coupon, Discount, Tax};
pub use gift_certificate::GiftCertificate;
pub use product::{
    ChannelAssignment, CustomField, CustomUrl, Image, Metafield, Product, ProductInventory,
    ProductSalePrice, DETAIL_INCLUDES,
};
pub use tax::{ClassRate, Location, ShopperTargetSettings, TaxClassRate, TaxZone};
pub use variant::{Variant, VariantInventory, VariantSalePrice};

/// Unwraps an identifying field of a write payload.
///
/// A payload without it cannot name its target, so the request is never sent.
pub(crate) fn required<T>(
    value: Option<T>,
    resource: &'static str,
    field: &str,
) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::NotFound {
        resource,
        key: format!("without {field}"),
    })
}

/// Maps the 204 sentinel of a filtered lookup to a miss on `key`.
pub(crate) fn no_match(error: ApiError, resource: &'static str, key: &str) -> ApiError {
    if error.is_no_content() {
        ApiError::NotFound {
            resource,
            key: key.to_string(),
        }
    } else {
        error
    }
}
