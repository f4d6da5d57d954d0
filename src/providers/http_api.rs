use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::conversion::{ConversionApi, ConversionQuote, ConversionRecord, CurrencyInfo};

#[derive(Debug, Deserialize)]
struct CurrenciesResponse {
    data: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct ConvertRequest<'a> {
    from: &'a str,
    to: &'a str,
    amount: f64,
}

/// `ConversionApi` over HTTP/JSON.
pub struct HttpConversionApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpConversionApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fxconv/1.0")
            .timeout(timeout)
            .build()?;
        Ok(HttpConversionApi {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        endpoint: &str,
    ) -> Result<T> {
        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for {}",
                response.status(),
                endpoint
            ));
        }

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", endpoint, e))
    }
}

#[async_trait]
impl ConversionApi for HttpConversionApi {
    async fn currencies(&self) -> Result<Vec<CurrencyInfo>> {
        let url = format!("{}/currencies", self.base_url);
        debug!("Requesting currencies from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        let data: CurrenciesResponse = Self::decode(response, "/currencies").await?;
        let currencies = data
            .data
            .into_iter()
            .map(|(code, name)| CurrencyInfo {
                name: name.as_str().map_or_else(|| name.to_string(), str::to_string),
                code,
            })
            .collect::<Vec<_>>();
        debug!(count = currencies.len(), "Received currencies");
        Ok(currencies)
    }

    #[instrument(name = "HttpConvert", skip(self))]
    async fn convert(&self, from: &str, to: &str, amount: f64) -> Result<ConversionQuote> {
        let url = format!("{}/convert", self.base_url);
        debug!("Requesting conversion from {}", url);

        let response = self
            .client
            .post(&url)
            .json(&ConvertRequest { from, to, amount })
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for {}->{} URL: {}", e, from, to, url))?;

        debug!(response = ?response, "Received conversion response");
        Self::decode(response, "/convert").await
    }

    async fn history(&self) -> Result<Vec<ConversionRecord>> {
        let url = format!("{}/history", self.base_url);
        debug!("Requesting history from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        Self::decode(response, "/history").await
    }
}
