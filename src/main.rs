//! Shipping Quote relay server
//!
//! Exposes the rate-quote and label-purchase relays over HTTP. The
//! provider credential is read from the environment and never leaves
//! this process.

use actix_web::{middleware, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

use shipping_quote::api;
use shipping_quote::config::Settings;
use shipping_quote::providers::{ShippingProvider, ShippoProvider};
use shipping_quote::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("shipping_quote=info,actix_web=info"))
        )
        .json()
        .init();

    let settings = Settings::load().context("Failed to load configuration")?;
    let bind_addr = settings.bind_addr();

    let provider: Arc<dyn ShippingProvider> = Arc::new(
        ShippoProvider::new(&settings.shippo).context("Failed to initialize Shippo client")?
    );

    info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_addr = %bind_addr,
        provider = provider.code(),
        provider_url = %settings.shippo.base_url,
        "Starting shipping quote relay"
    );

    let workers = settings.server.workers.unwrap_or_else(num_cpus::get);
    let app_state = AppState::new(settings, provider);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(TracingLogger::default())
            .wrap(middleware::Compress::default())
            .wrap(
                middleware::DefaultHeaders::new()
                    .add(("X-Service", "shipping-quote"))
                    .add(("X-Version", env!("CARGO_PKG_VERSION")))
            )
            .configure(api::configure_routes)
    })
    .workers(workers)
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await
    .context("HTTP server terminated")
}
