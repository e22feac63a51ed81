use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Purchased label, as returned by the label relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabelResult {
    /// Link to the PDF label document
    pub label_url: String,
    pub tracking_number: String,
}
