//! Catalog product resource.
//!
//! Products live under `/v3/catalog/products`. Besides the collection
//! operations from [`CollectionResource`], this module provides creation,
//! SKU-addressed updates, inventory and sale price updates, metafield reads
//! and channel assignments.
//!
//! # Example
//!
//! ```rust,ignore
//! use bigcommerce_api::rest::resources::{Product, ProductInventory};
//! use bigcommerce_api::rest::{CollectionResource, QueryArgs};
//!
//! // Every visible product, with variants
//! let products = Product::all(
//!     &client,
//!     &QueryArgs::new().arg("is_visible", true).include(["variants"]),
//! )
//! .await;
//!
//! // One product with every sub-resource
//! let product = Product::find_detailed(&client, 42).await?;
//!
//! // Stock update
//! let updated = Product::update_inventory(&client, &ProductInventory {
//!     id: Some(42),
//!     inventory_level: Some(7),
//!     ..Default::default()
//! })
//! .await?;
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::variant::Variant;
use super::{no_match, required};
use crate::clients::{HttpMethod, RestClient};
use crate::rest::{ApiError, BodyShape, CollectionResource, QueryArgs};

/// Sub-resources included by [`Product::find_detailed`].
pub const DETAIL_INCLUDES: [&str; 8] = [
    "variants",
    "images",
    "custom_fields",
    "bulk_pricing_rules",
    "primary_image",
    "modifiers",
    "options",
    "videos",
];

const CHANNEL_ASSIGNMENTS_PATH: &str = "/v3/catalog/products/channel-assignments";

/// A catalog product.
///
/// All fields are optional so the same struct serves as a full record, a
/// creation payload and a partial update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// The unique identifier, assigned by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// The product name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// `physical` or `digital`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,

    /// The stock keeping unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// The description, as HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // Dimensions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    // Pricing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retail_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_class_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_tax_code: Option<String>,

    /// The price after sale price and rules, read-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculated_price: Option<f64>,

    /// Category ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_set_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_set_display: Option<String>,

    // Inventory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_warning_level: Option<i64>,
    /// `none`, `product` or `variant`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_tracking: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews_rating_sum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_sold: Option<i64>,

    // Shipping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_cost_shipping_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_free_shipping: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_products: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warranty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin_picking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_file: Option<String>,

    // Identifiers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mpn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_keywords: Option<String>,
    /// `available`, `disabled` or `preorder`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift_wrapping_options_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift_wrapping_options_list: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_condition_shown: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_quantity_minimum: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_quantity_maximum: Option<u64>,

    // SEO
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_url: Option<CustomUrl>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,

    // Preorder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preorder_release_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preorder_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_preorder_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_price_hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_hidden_label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_variant_id: Option<u64>,

    // Open Graph
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_graph_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_graph_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_graph_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_graph_use_meta_description: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_graph_use_product_name: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_graph_use_image: Option<bool>,

    // Sub-resources, present when requested with `include`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<Variant>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_image: Option<Image>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<CustomField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_pricing_rules: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Vec<serde_json::Value>>,
}

/// The storefront URL of a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomUrl {
    pub url: String,
    #[serde(default)]
    pub is_customized: bool,
}

/// A name/value pair attached to a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub value: String,
}

/// A product image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_thumbnail: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_zoom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_standard: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_tiny: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<DateTime<Utc>>,
}

/// Inventory fields of a product, for partial updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInventory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_warning_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_tracking: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_description: Option<String>,
}

/// The sale price of a product, for partial updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSalePrice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub sale_price: f64,
}

/// A metafield attached to a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metafield {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub key: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Who may read and write the field, e.g. `app_only` or `read`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_set: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<DateTime<Utc>>,
}

/// Assignment of a product to a sales channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelAssignment {
    pub product_id: u64,
    pub channel_id: u64,
}

impl CollectionResource for Product {
    const NAME: &'static str = "Product";
    const COLLECTION_PATH: &'static str = "/v3/catalog/products";
}

impl Product {
    /// Fetches one product with every sub-resource in [`DETAIL_INCLUDES`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the product does not exist, and any
    /// other [`ApiError`] from the request.
    pub async fn find_detailed(client: &RestClient, id: u64) -> Result<Self, ApiError> {
        Self::find(client, id, &QueryArgs::new().include(DETAIL_INCLUDES)).await
    }

    /// Fetches the metafields of a product, keyed by `key`.
    ///
    /// Only the first page of metafields is read.
    ///
    /// # Errors
    ///
    /// Returns any [`ApiError`] from the request.
    pub async fn metafields(
        client: &RestClient,
        id: u64,
    ) -> Result<HashMap<String, Metafield>, ApiError> {
        let path = format!("{}/metafields", Self::member_path(id));
        let fields: Vec<Metafield> = client
            .fetch_one(&path, BodyShape::Enveloped)
            .await
            .map_err(|e| e.for_lookup(Self::NAME, id.to_string()))?;
        Ok(fields
            .into_iter()
            .map(|field| (field.key.clone(), field))
            .collect())
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the API rejects the product, for
    /// example when the SKU already exists.
    pub async fn create(client: &RestClient, product: &Self) -> Result<Self, ApiError> {
        client
            .mutate(
                HttpMethod::Post,
                Self::COLLECTION_PATH,
                product,
                BodyShape::Enveloped,
            )
            .await
    }

    /// Updates the product carrying `product.sku`.
    ///
    /// The product is looked up on the first page of `sku` matches only.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the payload has no SKU or no product
    /// has it, and any [`ApiError`] from the lookup or the update.
    pub async fn update_by_sku(client: &RestClient, product: &Self) -> Result<Self, ApiError> {
        let sku = required(product.sku.as_deref(), Self::NAME, "sku")?;
        let matches = Self::page(client, &QueryArgs::new().arg("sku", sku), 1)
            .await
            .map_err(|e| no_match(e, Self::NAME, sku))?;

        let id = matches
            .items
            .first()
            .and_then(|found| found.id)
            .ok_or_else(|| ApiError::NotFound {
                resource: Self::NAME,
                key: sku.to_string(),
            })?;

        tracing::debug!(id, sku = %sku, "Updating product by SKU");
        client
            .mutate(
                HttpMethod::Put,
                &Self::member_path(id),
                product,
                BodyShape::Enveloped,
            )
            .await
    }

    /// Updates the inventory fields of a product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] on 422 and any other [`ApiError`].
    pub async fn update_inventory(
        client: &RestClient,
        inventory: &ProductInventory,
    ) -> Result<Self, ApiError> {
        let path = Self::member_path(required(inventory.id, Self::NAME, "id")?);
        client
            .mutate(HttpMethod::Put, &path, inventory, BodyShape::Enveloped)
            .await
    }

    /// Sets the sale price of a product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] on 422 and any other [`ApiError`].
    pub async fn update_sale_price(
        client: &RestClient,
        price: &ProductSalePrice,
    ) -> Result<Self, ApiError> {
        let path = Self::member_path(required(price.id, Self::NAME, "id")?);
        client
            .mutate(HttpMethod::Put, &path, price, BodyShape::Enveloped)
            .await
    }

    /// Assigns a product to a channel.
    ///
    /// Returns whether the server answered with a 2xx status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the request could not be sent.
    pub async fn add_to_channel(
        client: &RestClient,
        product_id: u64,
        channel_id: u64,
    ) -> Result<bool, ApiError> {
        let body = [ChannelAssignment {
            product_id,
            channel_id,
        }];
        let payload = serde_json::to_vec(&body).map_err(|source| ApiError::Encode { source })?;
        let response = client
            .send(HttpMethod::Put, CHANNEL_ASSIGNMENTS_PATH, Some(payload))
            .await?;
        Ok(response.is_ok())
    }

    /// Removes a product from a channel.
    ///
    /// Returns whether the server answered with a 2xx status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the request could not be sent.
    pub async fn remove_from_channel(
        client: &RestClient,
        product_id: u64,
        channel_id: u64,
    ) -> Result<bool, ApiError> {
        let path = QueryArgs::new()
            .field_in("product_id", [product_id])
            .field_in("channel_id", [channel_id])
            .apply_to(CHANNEL_ASSIGNMENTS_PATH);
        let response = client.send(HttpMethod::Delete, &path, None).await?;
        Ok(response.is_ok())
    }
}
