//! Gift certificate resource (v2).
//!
//! The v2 API answers with bare bodies rather than `{"data": …}` envelopes,
//! and writes dates in RFC 2822 form (`Tue, 04 Jun 2024 10:00:00 +0000`).
//!
//! # Example
//!
//! ```rust,ignore
//! use bigcommerce_api::rest::resources::GiftCertificate;
//!
//! if let Some(mut certificate) = GiftCertificate::find_by_code(&client, "GC-123").await? {
//!     certificate.balance = Some("0.00".to_string());
//!     GiftCertificate::update(&client, &certificate).await?;
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::required;
use crate::clients::{HttpMethod, RestClient};
use crate::rest::{ApiError, BodyShape, QueryArgs};

const GIFT_CERTIFICATES_PATH: &str = "/v2/gift_certificates";

/// A gift certificate.
///
/// Amounts are decimal strings, as the v2 API sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftCertificate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
    /// `active`, `pending`, `disabled` or `expired`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(
        default,
        with = "v2_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub purchase_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "v2_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiry_date: Option<DateTime<Utc>>,
}

impl GiftCertificate {
    /// Returns the path of one gift certificate.
    #[must_use]
    pub fn member_path(id: u64) -> String {
        format!("{GIFT_CERTIFICATES_PATH}/{id}")
    }

    /// Looks up a gift certificate by code.
    ///
    /// Returns `None` when nothing matches, whether the server answers with
    /// an empty list or with 204.
    ///
    /// # Errors
    ///
    /// Returns any other [`ApiError`] from the request.
    pub async fn find_by_code(client: &RestClient, code: &str) -> Result<Option<Self>, ApiError> {
        let path = QueryArgs::new()
            .arg("code", code)
            .apply_to(GIFT_CERTIFICATES_PATH);
        match client.fetch_one::<Vec<Self>>(&path, BodyShape::Bare).await {
            Ok(found) => Ok(found.into_iter().next()),
            Err(ApiError::NoContent) => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Creates a gift certificate.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] on 422 and any other [`ApiError`].
    pub async fn create(client: &RestClient, certificate: &Self) -> Result<Self, ApiError> {
        client
            .mutate(
                HttpMethod::Post,
                GIFT_CERTIFICATES_PATH,
                certificate,
                BodyShape::Bare,
            )
            .await
    }

    /// Updates the gift certificate with `certificate.id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the payload has no id or no
    /// certificate has it, and any other [`ApiError`].
    pub async fn update(client: &RestClient, certificate: &Self) -> Result<Self, ApiError> {
        let id = required(certificate.id, "GiftCertificate", "id")?;
        client
            .mutate(
                HttpMethod::Put,
                &Self::member_path(id),
                certificate,
                BodyShape::Bare,
            )
            .await
            .map_err(|e| e.for_lookup("GiftCertificate", id.to_string()))
    }
}

/// Serde support for v2 dates.
///
/// Reads RFC 2822 strings, RFC 3339 strings and integer Unix seconds; an
/// empty string or `null` is `None`. Always writes RFC 2822.
mod v2_date {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const RFC_2822: &str = "%a, %d %b %Y %H:%M:%S %z";

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(i64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&date.format(RFC_2822).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Seconds(seconds)) => DateTime::from_timestamp(seconds, 0)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {seconds}"))),
            Some(Raw::Text(text)) => parse(&text).map_err(de::Error::custom),
        }
    }

    fn parse(text: &str) -> Result<Option<DateTime<Utc>>, String> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        DateTime::parse_from_rfc2822(text)
            .or_else(|_| DateTime::parse_from_rfc3339(text))
            .map(|date| Some(date.with_timezone(&Utc)))
            .map_err(|_| format!("unrecognized date: {text}"))
    }
}
