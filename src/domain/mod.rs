//! Domain types and models

mod address;
mod parcel;
mod rate;
mod label;
pub mod de;
pub mod validation;

pub use address::{Address, AddressField};
pub use parcel::{Parcel, ParcelField};
pub use rate::{Rate, ServiceLevel, RateAttribute};
pub use label::LabelResult;
pub use validation::{ValidationError, validate_quote};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body accepted by the rate-quote relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuoteRequest {
    pub from: Address,
    pub to: Address,
    pub parcel: Parcel,
}

/// Body accepted by the label-purchase relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabelRequest {
    pub rate_id: String,
}
