//! Shippo API request and response models
//!
//! Only the fields the relay reads are typed; rates stay raw so they can
//! be forwarded without loss.

use serde::{Deserialize, Serialize};

use crate::domain::de::null_as_default;
use crate::domain::{Address, Parcel};

/// Marks a shipment as an inquiry; no shipment is created
pub const OBJECT_PURPOSE_QUOTE: &str = "QUOTE";

pub const LABEL_FILE_TYPE_PDF: &str = "PDF";

/// POST /shipments/ body
#[derive(Debug, Serialize)]
pub struct ShipmentRequest<'a> {
    pub address_from: &'a Address,
    pub address_to: &'a Address,
    pub parcels: Vec<&'a Parcel>,
    pub object_purpose: &'static str,
    #[serde(rename = "async")]
    pub is_async: bool,
}

/// POST /shipments/ response
#[derive(Debug, Deserialize)]
pub struct ShipmentResponse {
    #[serde(default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rates: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<ShippoMessage>,
}

/// POST /transactions/ body
#[derive(Debug, Serialize)]
pub struct TransactionRequest<'a> {
    pub rate: &'a str,
    pub label_file_type: &'static str,
    #[serde(rename = "async")]
    pub is_async: bool,
}

/// POST /transactions/ response
#[derive(Debug, Deserialize)]
pub struct TransactionResponse {
    #[serde(default)]
    pub object_id: Option<String>,
    /// "SUCCESS", "ERROR", "QUEUED", ...
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub label_url: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<ShippoMessage>,
}

/// Informational or error message attached to a Shippo object
#[derive(Debug, Clone, Deserialize)]
pub struct ShippoMessage {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}
