use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::de::null_as_default;

/// A priced shipping option returned by the provider
///
/// The relay forwards rates untouched as raw JSON; this typed view is what
/// the form reads back out of the relay response. Only `object_id` is
/// required, display fields fall back to empty when absent or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Rate {
    pub object_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount_local: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency_local: String,
    /// Carrier name, e.g. "USPS"
    #[serde(default, deserialize_with = "null_as_default")]
    pub provider: String,
    /// Carrier logo, 75px variant
    #[serde(default, deserialize_with = "null_as_default")]
    pub provider_image_75: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub servicelevel: ServiceLevel,
    #[serde(default)]
    pub estimated_days: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration_terms: String,
    /// Classification tags such as "FASTEST" or "CHEAPEST"
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServiceLevel {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Known rate classification tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateAttribute {
    Fastest,
    Cheapest,
    BestValue,
    Other(String),
}

impl RateAttribute {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "FASTEST" => RateAttribute::Fastest,
            "CHEAPEST" => RateAttribute::Cheapest,
            "BESTVALUE" => RateAttribute::BestValue,
            other => RateAttribute::Other(other.to_string()),
        }
    }
}

impl Rate {
    pub fn attributes(&self) -> impl Iterator<Item = RateAttribute> + '_ {
        self.attributes.iter().map(|a| RateAttribute::parse(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_provider_rate() {
        let rate: Rate = serde_json::from_value(json!({
            "object_id": "r1",
            "amount_local": "10.00",
            "currency_local": "USD",
            "provider": "USPS",
            "provider_image_75": "https://shippo-static.s3.amazonaws.com/providers/75/USPS.png",
            "servicelevel": {"name": "Priority Mail", "token": "usps_priority"},
            "estimated_days": 2,
            "duration_terms": "Delivery in 1 to 3 business days.",
            "attributes": ["FASTEST"],
            "amount": "10.00",
            "carrier_account": "abc"
        }))
        .unwrap();

        assert_eq!(rate.object_id, "r1");
        assert_eq!(rate.estimated_days, Some(2));
        assert_eq!(rate.attributes().next(), Some(RateAttribute::Fastest));
    }

    #[test]
    fn test_missing_optional_fields() {
        let rate: Rate = serde_json::from_value(json!({
            "object_id": "r2",
            "amount_local": "4.5",
            "currency_local": "USD",
            "provider": "UPS",
            "servicelevel": {"name": "Ground"}
        }))
        .unwrap();

        assert_eq!(rate.estimated_days, None);
        assert!(rate.attributes.is_empty());
        assert!(rate.duration_terms.is_empty());
    }

    #[test]
    fn test_null_display_fields() {
        let rate: Rate = serde_json::from_value(json!({
            "object_id": "r3",
            "amount_local": "7.25",
            "currency_local": null,
            "provider": "DHL",
            "servicelevel": null,
            "duration_terms": null,
            "attributes": null,
            "provider_image_75": null
        }))
        .unwrap();

        assert_eq!(rate.amount_local, "7.25");
        assert!(rate.currency_local.is_empty());
        assert!(rate.servicelevel.name.is_empty());
        assert!(rate.duration_terms.is_empty());
        assert!(rate.attributes.is_empty());
    }

    #[test]
    fn test_only_object_id_required() {
        let rate: Rate = serde_json::from_value(json!({"object_id": "r4"})).unwrap();
        assert_eq!(rate.object_id, "r4");
        assert!(serde_json::from_value::<Rate>(json!({"amount_local": "1.00"})).is_err());
    }

    #[test]
    fn test_unknown_attribute() {
        assert_eq!(
            RateAttribute::parse("RECOMMENDED"),
            RateAttribute::Other("RECOMMENDED".to_string())
        );
    }
}
