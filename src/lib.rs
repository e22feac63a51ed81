//! Shipping Quote
//!
//! A relay that quotes shipping rates and buys labels through a shipping
//! provider, plus the form state machine that drives it from a front-end.

pub mod api;
pub mod config;
pub mod domain;
pub mod form;
pub mod providers;

use actix_web::web;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::config::Settings;
use crate::providers::ShippingProvider;

/// Application state shared across all handlers
///
/// The provider holds the credential; nothing here is per-request or
/// mutable, so concurrent callers share no writable state.
pub struct AppState {
    pub settings: Settings,
    pub provider: Arc<dyn ShippingProvider>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(settings: Settings, provider: Arc<dyn ShippingProvider>) -> web::Data<Self> {
        web::Data::new(AppState {
            settings,
            provider,
            started_at: Utc::now(),
        })
    }
}
