use serde::Deserialize;
use std::fs;

/// Outbound HTTP settings for the market-data fetcher.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_coingecko_api_base")]
    pub coingecko_api_base: String,
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_coingecko_api_base() -> String {
    "https://api.coingecko.com/api/v3".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            coingecko_api_base: default_coingecko_api_base(),
        }
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
