//! Label-purchase relay endpoint

use actix_web::{web, HttpResponse};
use tracing::info;

use crate::AppState;
use crate::api::error::{provider_failure, ErrorResponse};
use crate::domain::{LabelRequest, LabelResult};

/// POST /api/shipping/labels - Buy a label for a quoted rate
///
/// The rate id is passed through as-is; the provider decides whether it
/// refers to a real, unexpired rate.
#[utoipa::path(
    post,
    path = "/api/shipping/labels",
    tag = "shipping",
    request_body = LabelRequest,
    responses(
        (status = 200, description = "Label purchased", body = LabelResult),
        (status = 502, description = "Provider call failed", body = ErrorResponse)
    )
)]
pub async fn purchase_label(
    state: web::Data<AppState>,
    body: web::Json<LabelRequest>,
) -> HttpResponse {
    info!(rate_id = %body.rate_id, "Relaying label purchase");

    match state.provider.purchase_label(&body.rate_id).await {
        Ok(label) => HttpResponse::Ok().json(label),
        Err(e) => provider_failure(state.provider.as_ref(), &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{app_state, FakeProvider};
    use crate::providers::ProviderError;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    #[actix_web::test]
    async fn test_label_response_shape() {
        let provider = FakeProvider::with_label(LabelResult {
            label_url: "https://x/label.pdf".to_string(),
            tracking_number: "TRK123".to_string(),
        });
        let app = test::init_service(
            App::new()
                .app_data(app_state(provider.clone()))
                .configure(crate::api::configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/shipping/labels")
            .set_json(json!({"rateId": "r1"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"labelUrl": "https://x/label.pdf", "trackingNumber": "TRK123"}));
        assert_eq!(provider.label_rate_ids(), vec!["r1".to_string()]);
    }

    #[actix_web::test]
    async fn test_failed_transaction_is_502() {
        let provider = FakeProvider::failing(|| ProviderError::TransactionFailed("Rate expired".to_string()));
        let app = test::init_service(
            App::new()
                .app_data(app_state(provider))
                .configure(crate::api::configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/shipping/labels")
            .set_json(json!({"rateId": "stale"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(!body.error.contains("Rate expired"));
    }
}
