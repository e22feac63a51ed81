//! OpenAPI 3.0 specification definition

use utoipa::OpenApi;

use crate::api::error::ErrorResponse;
use crate::api::handlers::health::HealthResponse;
use crate::domain::{Address, LabelRequest, LabelResult, Parcel, QuoteRequest, Rate, ServiceLevel};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shipping Quote Relay",
        version = "0.1.0",
        description = "Relays rate quotes and label purchases to the shipping provider",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/", description = "Current server")
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "shipping", description = "Rate quote and label purchase relays")
    ),
    paths(
        crate::api::handlers::health::health_check,
        crate::api::handlers::rates::get_rates,
        crate::api::handlers::labels::purchase_label,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            QuoteRequest,
            Address,
            Parcel,
            Rate,
            ServiceLevel,
            LabelRequest,
            LabelResult,
        )
    )
)]
pub struct ApiDoc;
