//! HTTP client for provider APIs
//!
//! One outbound request per call: no retries, no backoff. A slow provider
//! holds the relay request open until the configured timeout.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::providers::traits::{ProviderError, ProviderResult};

/// HTTP client bound to one provider base URL
#[derive(Clone)]
pub struct ProviderHttpClient {
    client: Client,
    base_url: String,
}

impl ProviderHttpClient {
    /// Create a client for `base_url` with the given request timeout
    pub fn new(base_url: &str, timeout: Duration) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("shipping-quote/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(ProviderHttpClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a POST request against a path under the base URL
    pub fn post(&self, path: &str) -> ProviderRequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Provider API request");
        ProviderRequestBuilder {
            builder: self.client.post(url),
        }
    }
}

/// Request builder wrapper that decodes provider responses
pub struct ProviderRequestBuilder {
    builder: RequestBuilder,
}

impl ProviderRequestBuilder {
    /// Add an `Authorization: <scheme> <token>` header
    pub fn auth(mut self, scheme: &str, token: &str) -> Self {
        self.builder = self.builder.header(reqwest::header::AUTHORIZATION, format!("{} {}", scheme, token));
        self
    }

    /// Add JSON body to the request
    pub fn json<T: serde::Serialize + ?Sized>(mut self, json: &T) -> Self {
        self.builder = self.builder.json(json);
        self
    }

    /// Send the request and decode a 2xx JSON body
    pub async fn send_json<T: DeserializeOwned>(self) -> ProviderResult<T> {
        let response = self.builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Provider returned an error status");
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ProviderError::ParseError(format!("JSON parse error: {} - Body: {}", e, truncate(&text, 500))))
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
