use serde_json::Value;

use crate::model::{Currency, FetchError, Provider, Symbol};

/// Fetches raw market-chart payloads from an external provider.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_raw(
        &self,
        symbol: Symbol,
        currency: Currency,
        days: u32,
        provider: Provider,
    ) -> Result<Value, FetchError>;
}
