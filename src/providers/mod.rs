//! Shipping provider integration
//!
//! The relay endpoints talk to the provider only through the
//! `ShippingProvider` trait so handlers can be exercised against a fake.
//!
//! ```text
//!   /api/shipping/getRates ─┐
//!                           ├──► ShippingProvider ──► ShippoProvider ──► api.goshippo.com
//!   /api/shipping/labels  ──┘
//! ```

pub mod traits;
pub mod http_client;
pub mod shippo;

pub use traits::{ShippingProvider, ProviderError, ProviderResult};
pub use http_client::ProviderHttpClient;
pub use shippo::ShippoProvider;
