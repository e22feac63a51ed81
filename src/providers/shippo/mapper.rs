//! Shippo response mapping

use tracing::warn;

use crate::domain::LabelResult;
use crate::providers::traits::{ProviderError, ProviderResult};
use super::models::{ShipmentResponse, ShippoMessage, TransactionResponse};

pub struct ShippoMapper;

impl ShippoMapper {
    /// Rates pass through untouched: no filtering, sorting or enrichment
    pub fn rates(shipment: ShipmentResponse) -> Vec<serde_json::Value> {
        shipment.rates
    }

    /// Keep only the label URL and tracking number of a transaction
    pub fn label(transaction: TransactionResponse) -> ProviderResult<LabelResult> {
        if transaction.status.as_deref() == Some("ERROR") {
            return Err(ProviderError::TransactionFailed(join_messages(&transaction.messages)));
        }

        match transaction.label_url {
            Some(label_url) if !label_url.is_empty() => {
                let tracking_number = transaction.tracking_number.unwrap_or_default();
                if tracking_number.is_empty() {
                    warn!(
                        transaction = transaction.object_id.as_deref().unwrap_or("<unknown>"),
                        "Label bought without a tracking number"
                    );
                }
                Ok(LabelResult {
                    label_url,
                    tracking_number,
                })
            }
            _ => Err(ProviderError::TransactionFailed(format!(
                "transaction {} has no label (status {})",
                transaction.object_id.as_deref().unwrap_or("<unknown>"),
                transaction.status.as_deref().unwrap_or("<none>")
            ))),
        }
    }
}

fn join_messages(messages: &[ShippoMessage]) -> String {
    if messages.is_empty() {
        return "no details given".to_string();
    }
    messages
        .iter()
        .map(|m| {
            let text = match m.code.as_deref() {
                Some(code) if !code.is_empty() => format!("{} ({})", m.text, code),
                _ => m.text.clone(),
            };
            match &m.source {
                Some(source) => format!("{}: {}", source, text),
                None => text,
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}
