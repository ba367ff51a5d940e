//! Catalog variant resource.
//!
//! Variants are listed through `/v3/catalog/variants` but written through
//! their product: `/v3/catalog/products/{product_id}/variants/{id}`.
//!
//! # Example
//!
//! ```rust,ignore
//! use bigcommerce_api::rest::resources::{Variant, VariantInventory};
//!
//! let update = VariantInventory {
//!     id: Some(17),
//!     product_id: Some(5),
//!     inventory_level: 40,
//!     inventory_warning_level: None,
//! };
//! let variant = Variant::update_inventory(&client, &update).await?;
//! ```

use serde::{Deserialize, Serialize};

use super::{no_match, required};
use crate::clients::{HttpMethod, RestClient};
use crate::rest::{ApiError, BodyShape, CollectionResource, QueryArgs};

/// A product variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku_id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculated_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retail_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_free_shipping: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_cost_shipping_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculated_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchasing_disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchasing_disabled_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mpn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_warning_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin_picking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_values: Option<Vec<serde_json::Value>>,
}

/// Inventory fields of a variant, for partial updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantInventory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    pub inventory_level: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_warning_level: Option<i64>,
}

/// The sale price of a variant, for partial updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantSalePrice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    pub sale_price: f64,
}

impl CollectionResource for Variant {
    const NAME: &'static str = "Variant";
    const COLLECTION_PATH: &'static str = "/v3/catalog/variants";
}

impl Variant {
    /// Returns the write path of a variant under its product.
    #[must_use]
    pub fn write_path(product_id: u64, id: u64) -> String {
        format!("/v3/catalog/products/{product_id}/variants/{id}")
    }

    /// Updates the variant carrying `payload.sku`.
    ///
    /// The variant is looked up on the first page of `sku` matches only.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no variant has the SKU, and any
    /// [`ApiError`] from the lookup or the update.
    pub async fn update_by_sku(client: &RestClient, payload: &Self) -> Result<Self, ApiError> {
        let sku = required(payload.sku.as_deref(), Self::NAME, "sku")?;
        let args = QueryArgs::new().arg("sku", sku);
        let page = Self::page(client, &args, 1)
            .await
            .map_err(|e| no_match(e, Self::NAME, sku))?;

        let (id, product_id) = page
            .items
            .first()
            .and_then(|found| Some((found.id?, found.product_id?)))
            .ok_or_else(|| ApiError::NotFound {
                resource: Self::NAME,
                key: sku.to_string(),
            })?;

        tracing::debug!(id, product_id, "Updating variant by SKU");
        client
            .mutate(
                HttpMethod::Put,
                &Self::write_path(product_id, id),
                payload,
                BodyShape::Enveloped,
            )
            .await
    }

    /// Sets a variant's inventory level.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] on 422 and any other [`ApiError`].
    pub async fn update_inventory(
        client: &RestClient,
        payload: &VariantInventory,
    ) -> Result<Self, ApiError> {
        let path = Self::write_path(
            required(payload.product_id, Self::NAME, "product_id")?,
            required(payload.id, Self::NAME, "id")?,
        );
        client
            .mutate(HttpMethod::Put, &path, payload, BodyShape::Enveloped)
            .await
    }

    /// Sets a variant's sale price.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] on 422 and any other [`ApiError`].
    pub async fn update_sale_price(
        client: &RestClient,
        payload: &VariantSalePrice,
    ) -> Result<Self, ApiError> {
        let path = Self::write_path(
            required(payload.product_id, Self::NAME, "product_id")?,
            required(payload.id, Self::NAME, "id")?,
        );
        client
            .mutate(HttpMethod::Put, &path, payload, BodyShape::Enveloped)
            .await
    }
}
