//! Error body shared by the relay endpoints

use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::ValidationError;
use crate::providers::{ProviderError, ShippingProvider};

/// `{"error": "..."}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse { error: error.into() }
    }
}

/// Every provider failure is a gateway failure for the caller
pub fn provider_failure(provider: &dyn ShippingProvider, err: &ProviderError) -> HttpResponse {
    warn!(
        provider = provider.code(),
        upstream_status = err.upstream_status(),
        error = %err,
        "Provider call failed"
    );
    HttpResponse::BadGateway().json(ErrorResponse::new(err.public_message(provider.name())))
}

pub fn invalid_request(err: &ValidationError) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()))
}
