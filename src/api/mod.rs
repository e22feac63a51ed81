//! API module - HTTP routes and handlers

pub mod error;
pub mod handlers;
pub mod openapi;

use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::error::ErrorResponse;
use crate::api::openapi::ApiDoc;

/// Configure all API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api/shipping")
                .route("/getRates", web::post().to(handlers::rates::get_rates))
                .route("/labels", web::post().to(handlers::labels::purchase_label))
        )
        .route("/health", web::get().to(handlers::health::health_check))
        // Swagger UI and OpenAPI spec
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}")
                .url("/api-docs/openapi.json", ApiDoc::openapi())
        );
}

/// Malformed request bodies get the same `{error}` shape as every other failure
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = ErrorResponse::new(format!("Invalid request body: {}", err));
    actix_web::error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}
