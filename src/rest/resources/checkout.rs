//! Checkout resource.
//!
//! Checkouts are read one at a time from `/v3/checkouts/{id}` with their
//! consignments' shipping options, and can be given a manual discount.
//!
//! # Example
//!
//! ```rust,ignore
//! use bigcommerce_api::rest::resources::Checkout;
//!
//! let checkout = Checkout::find(&client, "2b5b3a1c-…").await?;
//! let cart = Checkout::add_discount(&client, "2b5b3a1c-…", 5.0, "Loyalty").await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpMethod, RestClient};
use crate::rest::{ApiError, BodyShape, QueryArgs};

const CHECKOUTS_PATH: &str = "/v3/checkouts";

/// A checkout in progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Checkout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart: Option<Cart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consignments: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxes: Option<Vec<Tax>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupons: Option<Vec<Coupon>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_cost_total_inc_tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_cost_total_ex_tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handling_cost_total_inc_tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handling_cost_total_ex_tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal_inc_tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal_ex_tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grand_total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fees: Option<Vec<serde_json::Value>>,
}

/// The cart behind a checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_amount_inc_tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_amount_ex_tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupons: Option<Vec<Coupon>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounts: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_items: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<DateTime<Utc>>,
}

/// A billing or shipping address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_or_province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_or_province_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A tax line of a checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tax {
    pub name: String,
    pub amount: f64,
}

/// A coupon applied to a checkout or cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// A manual cart-level discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub discounted_amount: f64,
    pub name: String,
}

#[derive(Serialize)]
struct DiscountRequest<'a> {
    carts: DiscountCarts<'a>,
}

#[derive(Serialize)]
struct DiscountCarts<'a> {
    discounts: &'a [Discount],
}

impl Checkout {
    /// Returns the path of one checkout.
    #[must_use]
    pub fn member_path(id: &str) -> String {
        format!("{CHECKOUTS_PATH}/{id}")
    }

    /// Fetches a checkout with its consignments' available shipping options.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the checkout does not exist, and
    /// any other [`ApiError`] from the request.
    pub async fn find(client: &RestClient, id: &str) -> Result<Self, ApiError> {
        let path = QueryArgs::new()
            .include(["consignments.available_shipping_options"])
            .apply_to(&Self::member_path(id));
        client
            .fetch_one(&path, BodyShape::Enveloped)
            .await
            .map_err(|e| e.for_lookup("Checkout", id))
    }

    /// Applies a manual discount to the checkout's cart.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the discount is rejected, and any
    /// other [`ApiError`] from the request.
    pub async fn add_discount(
        client: &RestClient,
        id: &str,
        amount: f64,
        name: &str,
    ) -> Result<Cart, ApiError> {
        let discounts = [Discount {
            discounted_amount: amount,
            name: name.to_string(),
        }];
        let body = DiscountRequest {
            carts: DiscountCarts {
                discounts: &discounts,
            },
        };
        let path = format!("{}/discounts", Self::member_path(id));
        client
            .mutate(HttpMethod::Post, &path, &body, BodyShape::Enveloped)
            .await
            .map_err(|e| e.for_lookup("Checkout", id))
    }
}
