use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::AppConfig;
use crate::fetcher::traits::Fetcher;
use crate::mapper;
use crate::model::{CapabilityError, Currency, FetchError, Provider, Symbol};
use crate::utils::truncate_snippet;

const SNIPPET_MAX_CHARS: usize = 200;

pub struct FetcherImpl {
    client: Client,
    config: AppConfig,
}

impl FetcherImpl {
    pub fn new(config: AppConfig) -> Self {
        let client = Client::builder()
            .user_agent("coinscope/0.1")
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap();

        Self { client, config }
    }

    fn market_chart_url(&self, provider: Provider, symbol_id: &str) -> Option<String> {
        match provider {
            Provider::Coingecko => Some(format!(
                "{}/coins/{}/market_chart",
                self.config.coingecko_api_base.trim_end_matches('/'),
                symbol_id
            )),
            // No chart endpoint wired up for these; their registries are
            // empty, so id resolution fails before this is reached.
            Provider::Binance | Provider::Kraken => None,
        }
    }

    fn transport_error(&self, provider: Provider, error: &reqwest::Error) -> FetchError {
        // reqwest folds timeouts into its one error type; the timeout case
        // must be checked before the generic transport case so it is not
        // shadowed by it.
        if error.is_timeout() {
            FetchError::Timeout {
                provider,
                timeout_secs: self.config.request_timeout_secs,
            }
        } else {
            FetchError::Transport {
                provider,
                message: error.to_string(),
            }
        }
    }
}

#[async_trait::async_trait]
impl Fetcher for FetcherImpl {
    /// Issues one bounded-timeout request for a market chart and classifies
    /// every failure mode into a distinct [`FetchError`] variant.
    async fn fetch_raw(
        &self,
        symbol: Symbol,
        currency: Currency,
        days: u32,
        provider: Provider,
    ) -> Result<Value, FetchError> {
        let currency_id = mapper::map_currency(currency, provider)?;
        let symbol_id = mapper::map_symbol(symbol, provider)?;

        let url = self
            .market_chart_url(provider, symbol_id)
            .ok_or(CapabilityError::Symbol { symbol, provider })?;
        debug!("GET {url}?vs_currency={currency_id}&days={days}");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("vs_currency", currency_id.to_string()),
                ("days", days.to_string()),
            ])
            .send()
            .await
            .map_err(|e| self.transport_error(provider, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::ResponseStatus {
                provider,
                status: status.as_u16(),
                snippet: truncate_snippet(&body, SNIPPET_MAX_CHARS),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(provider, &e))?;
        serde_json::from_str(&body).map_err(|e| FetchError::MalformedPayload(e.to_string()))
    }
}
