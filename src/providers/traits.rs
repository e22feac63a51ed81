//! Provider trait definitions
//!
//! Each provider implementation turns a quote request into a list of raw
//! rate objects and a rate id into a purchased label.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{LabelResult, QuoteRequest};

/// Provider error types
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl ProviderError {
    /// Message safe to hand back to a client
    ///
    /// Provider error bodies are never forwarded; only the status code is.
    pub fn public_message(&self, provider_name: &str) -> String {
        match self {
            ProviderError::ApiError { status, .. } => format!("{} error {}", provider_name, status),
            ProviderError::Http(_) => format!("{} unreachable", provider_name),
            ProviderError::ParseError(_) => format!("{} returned an unreadable response", provider_name),
            ProviderError::TransactionFailed(_) => format!("{} could not create the label", provider_name),
            ProviderError::NotConfigured(_) => format!("{} is not configured", provider_name),
        }
    }

    /// Upstream HTTP status, when the provider answered at all
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ProviderError::ApiError { status, .. } => Some(*status),
            ProviderError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Shipping provider contract used by the relay endpoints
#[async_trait]
pub trait ShippingProvider: Send + Sync {
    /// Provider code (e.g., "shippo")
    fn code(&self) -> &'static str;

    /// Provider display name, used in client-facing error messages
    fn name(&self) -> &'static str;

    /// Request quote-only rates for one parcel between two addresses
    ///
    /// Rates are returned exactly as the provider produced them.
    async fn create_quote(&self, request: &QuoteRequest) -> ProviderResult<Vec<serde_json::Value>>;

    /// Buy a PDF label for a previously quoted rate
    async fn purchase_label(&self, rate_id: &str) -> ProviderResult<LabelResult>;
}
