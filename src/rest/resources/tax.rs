//! Tax zones and tax rates.
//!
//! Both lists are read with one request: `/v3/tax/zones?id:in=…` and
//! `/v3/tax/rates?tax_zone_id:in=…`.

use serde::{Deserialize, Serialize};

use crate::clients::RestClient;
use crate::rest::{ApiError, BodyShape, QueryArgs};

/// A tax zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxZone {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub shopper_target_settings: ShopperTargetSettings,
}

/// Who a tax zone applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopperTargetSettings {
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub customer_groups: Vec<u64>,
}

/// A region of a tax zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub country_code: String,
    #[serde(default)]
    pub subdivision_codes: Vec<String>,
    #[serde(default)]
    pub postal_codes: Vec<String>,
}

/// The per-class rates of one tax rate entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxClassRate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_zone_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub class_rates: Vec<ClassRate>,
}

/// A rate for one tax class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassRate {
    pub rate: f64,
    pub tax_class_id: u64,
}

impl TaxZone {
    /// Fetches the tax zones with the given ids.
    ///
    /// # Errors
    ///
    /// Returns any [`ApiError`] from the request.
    pub async fn list(client: &RestClient, ids: &[u64]) -> Result<Vec<Self>, ApiError> {
        let path = QueryArgs::new()
            .id_in(ids.iter())
            .apply_to("/v3/tax/zones");
        client.fetch_one(&path, BodyShape::Enveloped).await
    }
}

impl TaxClassRate {
    /// Fetches the rates of the given tax zones.
    ///
    /// # Errors
    ///
    /// Returns any [`ApiError`] from the request.
    pub async fn list(client: &RestClient, zone_ids: &[u64]) -> Result<Vec<Self>, ApiError> {
        let path = QueryArgs::new()
            .field_in("tax_zone_id", zone_ids.iter())
            .apply_to("/v3/tax/rates");
        client.fetch_one(&path, BodyShape::Enveloped).await
    }
}
