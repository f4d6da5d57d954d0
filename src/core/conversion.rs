//! Conversion abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Short currency identifier such as "USD". Valid codes are whatever the API lists.
pub type CurrencyCode = String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: CurrencyCode,
    pub name: String,
}

/// One completed conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    pub from_currency: CurrencyCode,
    pub to_currency: CurrencyCode,
    pub amount: f64,
    pub result: f64,
    pub timestamp: DateTime<Utc>,
}

impl ConversionRecord {
    pub fn new(from: &str, to: &str, amount: f64, result: f64) -> Self {
        Self {
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            amount,
            result,
            timestamp: Utc::now(),
        }
    }
}

/// Body of a successful `POST /convert`. Older servers also send the rate and a timestamp.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionQuote {
    pub result: f64,
    #[serde(default)]
    pub exchange_rate: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[async_trait]
pub trait ConversionApi: Send + Sync {
    /// Supported currencies, in the order the server lists them.
    async fn currencies(&self) -> Result<Vec<CurrencyInfo>>;

    async fn convert(&self, from: &str, to: &str, amount: f64) -> Result<ConversionQuote>;

    /// Server-side conversion history.
    async fn history(&self) -> Result<Vec<ConversionRecord>>;
}
