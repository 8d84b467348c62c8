// Core types: Symbol, Currency, Provider, PricePoint, MarketChartData
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A tradable instrument we know how to ask providers about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Btc,
    Xrp,
    Eth,
    /// Catch-all for tickers we do not recognize. Never a registry key.
    Unmapped,
}

impl Symbol {
    /// Resolves a ticker string, falling back to the `Unmapped` sentinel.
    pub fn from_ticker(ticker: &str) -> Self {
        match ticker.to_ascii_lowercase().as_str() {
            "btc" => Self::Btc,
            "xrp" => Self::Xrp,
            "eth" => Self::Eth,
            _ => Self::Unmapped,
        }
    }
}

/// The quote currency a price is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Aud,
    Chf,
    Jpy,
    /// Catch-all for currency codes we do not recognize. Never a registry key.
    Unmapped,
}

impl Currency {
    /// Resolves a currency code, falling back to the `Unmapped` sentinel.
    pub fn from_code(code: &str) -> Self {
        match code.to_ascii_lowercase().as_str() {
            "usd" => Self::Usd,
            "eur" => Self::Eur,
            "gbp" => Self::Gbp,
            "aud" => Self::Aud,
            "chf" => Self::Chf,
            "jpy" => Self::Jpy,
            _ => Self::Unmapped,
        }
    }
}

/// An external market-data source with its own identifier scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Coingecko,
    Binance,
    Kraken,
}

/// Bucket granularity for resampling a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFrequency {
    Daily,
    Weekly,
}

/// A single (timestamp, price) observation. Timestamps are UTC, prices
/// finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// A symbol/currency pair with its price history, ascending by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketChartData {
    pub symbol: Symbol,
    pub currency: Currency,
    pub points: Vec<PricePoint>,
}

/// Summary statistics for one numeric column of a price table.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub variance: f64,
    pub first: f64,
    pub last: f64,
    pub percent_change: f64,
}

/// A (provider, symbol) or (provider, currency) pair absent from the
/// capability registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapabilityError {
    #[error("symbol {symbol:?} is not supported by provider {provider:?}")]
    Symbol { symbol: Symbol, provider: Provider },
    #[error("currency {currency:?} is not supported by provider {provider:?}")]
    Currency { currency: Currency, provider: Provider },
}

/// Failure modes of the fetch-and-clean path, one variant per kind so no
/// case can shadow another.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Capability(#[from] CapabilityError),
    #[error("no response from {provider:?} within {timeout_secs}s")]
    Timeout { provider: Provider, timeout_secs: u64 },
    #[error("transport failure talking to {provider:?}: {message}")]
    Transport { provider: Provider, message: String },
    #[error("{provider:?} answered with status {status}: {snippet}")]
    ResponseStatus {
        provider: Provider,
        status: u16,
        snippet: String,
    },
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// Precondition failures reported by the series validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("cannot operate on an empty table")]
    EmptyInput,
    #[error("column name must be a non-empty string")]
    InvalidColumn,
    #[error("column \"{0}\" not found in the table")]
    ColumnNotFound(String),
    #[error("column \"{0}\" holds no usable values")]
    AllValuesMissing(String),
}

/// Failures of individual analytics operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("arithmetic error: {0}")]
    Arithmetic(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
