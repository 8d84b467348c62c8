// Analyzer module: aggregates submodules for different aspects of analysis.

pub mod market_indicators;
pub mod price_analysis;
pub mod table;

pub use table::{PriceFrame, validate_series};
