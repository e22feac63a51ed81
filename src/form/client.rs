//! HTTP client for the relay endpoints, used by the form session

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::api::error::ErrorResponse;
use crate::domain::{LabelRequest, LabelResult, QuoteRequest, Rate};
use super::state::QuoteOutcome;

pub const RATES_PATH: &str = "/api/shipping/getRates";
pub const LABELS_PATH: &str = "/api/shipping/labels";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid relay URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Relay unreachable: {0}")]
    Http(#[from] reqwest::Error),

    /// The relay answered with a non-2xx status
    #[error("{message}")]
    Relay { status: u16, message: String },

    #[error("Unexpected relay response: {0}")]
    Decode(String),
}

/// Client for a running relay
#[derive(Clone)]
pub struct RelayClient {
    client: Client,
    base_url: Url,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("shipping-quote-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(RelayClient {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// POST the quote and read the rate list back
    pub async fn get_rates(&self, request: &QuoteRequest) -> Result<QuoteOutcome, ClientError> {
        let raw: serde_json::Value = self.post_json(RATES_PATH, request).await?;
        let rates = decode_rates(&raw)?;
        Ok(QuoteOutcome { rates, raw })
    }

    pub async fn purchase_label(&self, rate_id: &str) -> Result<LabelResult, ClientError> {
        let request = LabelRequest {
            rate_id: rate_id.to_string(),
        };
        self.post_json(LABELS_PATH, &request).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let url = self.base_url.join(path)?;
        debug!(url = %url, "Relay request");

        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error)
                .unwrap_or_else(|_| format!("Relay returned status {}", status.as_u16()));
            return Err(ClientError::Relay {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Read the typed rate list out of a relay response
///
/// A rate that cannot be read is left out of the list but stays in the raw
/// body; only a response that is not a list at all is an error.
fn decode_rates(raw: &serde_json::Value) -> Result<Vec<Rate>, ClientError> {
    let items = raw
        .as_array()
        .ok_or_else(|| ClientError::Decode("rate list: expected a JSON array".to_string()))?;

    let rates = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Rate>(item.clone()) {
            Ok(rate) => Some(rate),
            Err(e) => {
                warn!(index, error = %e, "Skipping unreadable rate");
                None
            }
        })
        .collect();
    Ok(rates)
}
