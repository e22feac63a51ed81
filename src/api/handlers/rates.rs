//! Rate-quote relay endpoint

use actix_web::{web, HttpResponse};
use std::time::Instant;
use tracing::{info, warn};

use crate::AppState;
use crate::api::error::{invalid_request, provider_failure, ErrorResponse};
use crate::domain::{validate_quote, QuoteRequest, Rate};

/// POST /api/shipping/getRates - Quote rates for one parcel
#[utoipa::path(
    post,
    path = "/api/shipping/getRates",
    tag = "shipping",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Provider rates, unmodified", body = [Rate]),
        (status = 400, description = "Malformed address or parcel", body = ErrorResponse),
        (status = 502, description = "Provider call failed", body = ErrorResponse)
    )
)]
pub async fn get_rates(
    state: web::Data<AppState>,
    body: web::Json<QuoteRequest>,
) -> HttpResponse {
    let start = Instant::now();
    let request = body.into_inner();

    if let Err(e) = validate_quote(&request) {
        warn!(error = %e, "Rejected quote request");
        return invalid_request(&e);
    }

    info!(
        from_zip = %request.from.zip,
        to_zip = %request.to.zip,
        to_country = %request.to.country,
        "Relaying quote request"
    );

    match state.provider.create_quote(&request).await {
        Ok(rates) => {
            info!(
                rate_count = rates.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Quote relayed"
            );
            HttpResponse::Ok().json(rates)
        }
        Err(e) => provider_failure(state.provider.as_ref(), &e),
    }
}
