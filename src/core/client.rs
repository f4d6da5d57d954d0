use crate::core::conversion::{
    ConversionApi, ConversionQuote, ConversionRecord, CurrencyCode, CurrencyInfo,
};
use crate::core::history::{ConversionHistory, ConversionHistoryStore};
use crate::core::loading::LoadingState;
use anyhow::{Result, bail};
use tracing::{debug, instrument, warn};

/// Front door for the remote conversion API.
///
/// Owns the loading flag and records every successful conversion in the
/// local history.
pub struct ConversionClient {
    api: Box<dyn ConversionApi>,
    history: ConversionHistoryStore,
    loading: LoadingState,
}

impl ConversionClient {
    pub fn new(api: Box<dyn ConversionApi>, history: ConversionHistoryStore) -> Self {
        Self {
            api,
            history,
            loading: LoadingState::new(),
        }
    }

    pub fn loading(&self) -> &LoadingState {
        &self.loading
    }

    pub async fn list_currencies(&self) -> Result<Vec<CurrencyCode>> {
        let currencies = self.list_currency_names().await?;
        Ok(currencies.into_iter().map(|c| c.code).collect())
    }

    pub async fn list_currency_names(&self) -> Result<Vec<CurrencyInfo>> {
        self.api.currencies().await.inspect_err(|e| {
            warn!(error = %e, "Failed to fetch currencies");
        })
    }

    pub async fn convert(&self, from: &str, to: &str, amount: f64) -> Result<f64> {
        self.convert_with_quote(from, to, amount)
            .await
            .map(|quote| quote.result)
    }

    /// Like [`convert`](Self::convert) but keeps the rate and server timestamp when sent.
    #[instrument(name = "Convert", skip(self))]
    pub async fn convert_with_quote(
        &self,
        from: &str,
        to: &str,
        amount: f64,
    ) -> Result<ConversionQuote> {
        if !amount.is_finite() || amount < 0.0 {
            bail!("Amount must be a non-negative number, got {amount}");
        }

        let quote = {
            let _loading = self.loading.begin();
            self.api.convert(from, to, amount).await
        };

        match quote {
            Ok(quote) => {
                debug!(result = quote.result, "Conversion succeeded");
                self.history
                    .record(ConversionRecord::new(from, to, amount, quote.result));
                Ok(quote)
            }
            Err(e) => {
                warn!(error = %e, "Conversion failed");
                Err(e)
            }
        }
    }

    pub fn fetch_history(&self) -> ConversionHistory {
        self.history.load()
    }

    /// History kept by the server rather than the local store.
    pub async fn fetch_remote_history(&self) -> Result<Vec<ConversionRecord>> {
        self.api.history().await.inspect_err(|e| {
            warn!(error = %e, "Failed to fetch remote history");
        })
    }

    pub fn clear_history(&self) {
        self.history.clear();
    }
}
