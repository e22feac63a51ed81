//! Shippo Provider Module
//!
//! Rate quotes go through the shipments endpoint with a quote-only
//! purpose; labels through the transactions endpoint.
//!
//! API Documentation: https://docs.goshippo.com/shippoapi/public-api/

mod client;
mod models;
mod mapper;

pub use client::ShippoProvider;
