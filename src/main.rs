use coinscope::analyzer::market_indicators::compute_rolling_window;
use coinscope::analyzer::price_analysis::{compute_returns, compute_stats};
use coinscope::config::{AppConfig, load_config};
use coinscope::{Currency, FetcherImpl, PRICE_COLUMN, PriceFrame, Provider, Symbol};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration from file, falling back to defaults
    let config = match load_config("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("Config load error ({e}), using defaults");
            AppConfig::default()
        }
    };

    let fetcher = FetcherImpl::new(config);

    let chart = match coinscope::fetch_market_chart(
        &fetcher,
        Symbol::Btc,
        Currency::Usd,
        30,
        Provider::Coingecko,
    )
    .await
    {
        Ok(chart) => chart,
        Err(e) => {
            error!("Fetch failed: {e}");
            return;
        }
    };

    let frame = PriceFrame::from_market_chart(&chart);

    match compute_stats(&frame, PRICE_COLUMN) {
        Ok(stats) => info!(
            "Stats over {} points: min {:.2}, max {:.2}, mean {:.2}, median {:.2}, std {:.2}, change {:+.2}%",
            stats.count, stats.min, stats.max, stats.mean, stats.median, stats.std_dev,
            stats.percent_change
        ),
        Err(e) => warn!("Stats failed: {e}"),
    }

    let enriched = compute_returns(&frame, PRICE_COLUMN)
        .and_then(|frame| compute_rolling_window(&frame, 7, PRICE_COLUMN));
    match enriched {
        Ok(enriched) => {
            let last = enriched.len() - 1;
            let pct = enriched.column("pct_change").and_then(|c| c[last]);
            let rolling = enriched.column("rolling_mean_7").and_then(|c| c[last]);
            info!(
                "Latest move: {:?}% | 7-point mean: {:?}",
                pct.map(|v| (v * 100.0).round() / 100.0),
                rolling.map(|v| (v * 100.0).round() / 100.0)
            );
        }
        Err(e) => warn!("Enrichment failed: {e}"),
    }
}
