//! Shippo API Client Implementation

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::ShippoSettings;
use crate::domain::{LabelResult, QuoteRequest};
use crate::providers::http_client::ProviderHttpClient;
use crate::providers::traits::{ProviderError, ProviderResult, ShippingProvider};
use super::mapper::ShippoMapper;
use super::models::*;

const AUTH_SCHEME: &str = "ShippoToken";

/// Shippo API client
pub struct ShippoProvider {
    client: ProviderHttpClient,
    api_token: String,
}

impl ShippoProvider {
    /// Create a new Shippo provider from settings
    pub fn new(settings: &ShippoSettings) -> ProviderResult<Self> {
        if settings.api_token.trim().is_empty() {
            return Err(ProviderError::NotConfigured(
                "SHIPPO_API_TOKEN environment variable not set".to_string(),
            ));
        }

        Ok(ShippoProvider {
            client: ProviderHttpClient::new(&settings.base_url, Duration::from_secs(settings.timeout_secs))?,
            api_token: settings.api_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

#[async_trait]
impl ShippingProvider for ShippoProvider {
    fn code(&self) -> &'static str {
        "shippo"
    }

    fn name(&self) -> &'static str {
        "Shippo"
    }

    async fn create_quote(&self, request: &QuoteRequest) -> ProviderResult<Vec<serde_json::Value>> {
        let body = ShipmentRequest {
            address_from: &request.from,
            address_to: &request.to,
            parcels: vec![&request.parcel],
            object_purpose: OBJECT_PURPOSE_QUOTE,
            is_async: false,
        };

        let shipment: ShipmentResponse = self.client
            .post("/shipments/")
            .auth(AUTH_SCHEME, &self.api_token)
            .json(&body)
            .send_json()
            .await?;

        debug!(
            shipment_id = shipment.object_id.as_deref().unwrap_or(""),
            status = shipment.status.as_deref().unwrap_or(""),
            messages = shipment.messages.len(),
            "Shippo shipment created"
        );

        let rates = ShippoMapper::rates(shipment);
        info!(rate_count = rates.len(), "Shippo quote received");
        Ok(rates)
    }

    async fn purchase_label(&self, rate_id: &str) -> ProviderResult<LabelResult> {
        let body = TransactionRequest {
            rate: rate_id,
            label_file_type: LABEL_FILE_TYPE_PDF,
            is_async: false,
        };

        let transaction: TransactionResponse = self.client
            .post("/transactions/")
            .auth(AUTH_SCHEME, &self.api_token)
            .json(&body)
            .send_json()
            .await?;

        let label = ShippoMapper::label(transaction)?;
        info!(rate_id = %rate_id, tracking_number = %label.tracking_number, "Shippo label purchased");
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, Parcel};

    fn settings(token: &str) -> ShippoSettings {
        ShippoSettings {
            api_token: token.to_string(),
            base_url: "https://api.goshippo.com".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_provider_creation() {
        let provider = ShippoProvider::new(&settings("shippo_test_abc")).unwrap();

        assert_eq!(provider.code(), "shippo");
        assert_eq!(provider.name(), "Shippo");
        assert_eq!(provider.base_url(), "https://api.goshippo.com");
    }

    #[test]
    fn test_provider_requires_token() {
        assert!(matches!(
            ShippoProvider::new(&settings("  ")),
            Err(ProviderError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_shipment_body_has_single_parcel() {
        let request = QuoteRequest {
            from: Address::demo_recipient(),
            to: Address::demo_recipient(),
            parcel: Parcel::demo(),
        };
        let body = ShipmentRequest {
            address_from: &request.from,
            address_to: &request.to,
            parcels: vec![&request.parcel],
            object_purpose: OBJECT_PURPOSE_QUOTE,
            is_async: false,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["parcels"], serde_json::json!([serde_json::to_value(Parcel::demo()).unwrap()]));
        assert_eq!(json["object_purpose"], "QUOTE");
        assert_eq!(json["async"], false);
        assert_eq!(json["address_to"]["name"], "Bilbo Baggins");
    }

    #[test]
    fn test_transaction_body() {
        let body = TransactionRequest {
            rate: "r1",
            label_file_type: LABEL_FILE_TYPE_PDF,
            is_async: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"rate": "r1", "label_file_type": "PDF", "async": false}));
    }
}
