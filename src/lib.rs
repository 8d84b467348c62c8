//! Market-chart ingestion and analytics.
//!
//! Fetches price history from an external provider, cleans the raw payload
//! into a canonical point sequence, and derives statistics over the
//! resulting table. Serving, rendering, caching, and retry policy are the
//! caller's business.

pub mod analyzer;
pub mod cleaner;
pub mod config;
pub mod fetcher;
pub mod mapper;
pub mod model;
pub mod utils;

use tracing::info;

pub use analyzer::table::{PRICE_COLUMN, PriceFrame};
pub use fetcher::{Fetcher, FetcherImpl};
pub use model::{
    AnalyticsError, CapabilityError, Currency, FetchError, MarketChartData, PricePoint, Provider,
    ResampleFrequency, SeriesStats, Symbol, ValidationError,
};

/// Fetches and cleans a market chart in one pass.
///
/// Exactly one network call; every fetch-layer error propagates unchanged.
pub async fn fetch_market_chart(
    fetcher: &impl Fetcher,
    symbol: Symbol,
    currency: Currency,
    days: u32,
    provider: Provider,
) -> Result<MarketChartData, FetchError> {
    info!(
        "Fetching market chart for {:?}/{:?} ({} days) from {:?}...",
        symbol, currency, days, provider
    );
    let raw = fetcher.fetch_raw(symbol, currency, days, provider).await?;
    let points = cleaner::clean(&raw)?;
    info!("Cleaned {} price points", points.len());

    Ok(MarketChartData {
        symbol,
        currency,
        points,
    })
}
