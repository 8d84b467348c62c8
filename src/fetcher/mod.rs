// Fetcher module: external market-data retrieval.

pub mod client;
pub mod traits;

pub use client::FetcherImpl;
pub use traits::Fetcher;
