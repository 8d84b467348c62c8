use std::time::Duration;

use chrono::DateTime;
use httpmock::prelude::*;
use serde_json::json;

use coinscope::cleaner::clean;
use coinscope::config::AppConfig;
use coinscope::{Currency, FetchError, Fetcher, FetcherImpl, Provider, Symbol};

fn mock_config(server: &MockServer) -> AppConfig {
    AppConfig {
        request_timeout_secs: 1,
        coingecko_api_base: server.base_url(),
    }
}

// --- cleaner ---

#[test]
fn clean_converts_every_pair_in_utc() {
    let raw = json!({
        "prices": [
            [1622505600000i64, 35000.0],
            [1622592000000i64, 36000.0],
            [1622678400000i64, 37000.0]
        ]
    });

    let points = clean(&raw).unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(
        points[0].timestamp,
        DateTime::from_timestamp_millis(1_622_505_600_000).unwrap()
    );
    assert_eq!(points[0].timestamp.to_rfc3339(), "2021-06-01T00:00:00+00:00");
    assert_eq!(points[0].price, 35000.0);
    assert_eq!(points[2].price, 37000.0);
}

#[test]
fn clean_accepts_integer_prices() {
    let raw = json!({ "prices": [[1732032000000i64, 50000]] });
    let points = clean(&raw).unwrap();
    assert_eq!(points[0].price, 50000.0);
}

#[test]
fn clean_sorts_out_of_order_points() {
    let raw = json!({
        "prices": [
            [1732032000000i64, 50000.0],
            [1738118400000i64, 60500.57657],
            [1732411840000i64, 980500.5678]
        ]
    });

    let points = clean(&raw).unwrap();
    let timestamps: Vec<_> = points.iter().map(|p| p.timestamp).collect();
    let mut sorted = timestamps.clone();
    sorted.sort();
    assert_eq!(timestamps, sorted);
    assert_eq!(points[1].price, 980500.5678);
}

#[test]
fn clean_rejects_a_payload_without_prices() {
    let raw = json!({
        "nothing": [[1622505600000i64, 35000.0]],
        "another nothing": [[1622505600000i64, 45000.0]]
    });
    assert!(matches!(
        clean(&raw),
        Err(FetchError::MalformedPayload(_))
    ));
}

#[test]
fn clean_is_all_or_nothing() {
    // One malformed pair poisons the whole payload; no partial output.
    for bad in [
        json!([1622505600000i64]),
        json!([1622505600000i64, 35000.0, 1.0]),
        json!(["2021-06-01", 35000.0]),
        json!([1622505600000i64, "35000"]),
        json!(42),
    ] {
        let raw = json!({ "prices": [[1622505600000i64, 35000.0], bad] });
        assert!(
            matches!(clean(&raw), Err(FetchError::MalformedPayload(_))),
            "expected failure for {bad}"
        );
    }
}

// --- fetch classification ---

#[tokio::test]
async fn fetch_returns_the_parsed_payload_on_success() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/coins/bitcoin/market_chart")
                .query_param("vs_currency", "usd")
                .query_param("days", "1");
            then.status(200)
                .json_body(json!({ "prices": [[1732032000000i64, 50000.0]] }));
        })
        .await;

    let fetcher = FetcherImpl::new(mock_config(&server));
    let raw = fetcher
        .fetch_raw(Symbol::Btc, Currency::Usd, 1, Provider::Coingecko)
        .await
        .unwrap();

    assert_eq!(raw["prices"][0][1], 50000.0);
    mock.assert_async().await;
}

#[tokio::test]
async fn fetch_reports_non_success_statuses_with_a_snippet() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/coins/bitcoin/market_chart");
            then.status(404).body("Not Found");
        })
        .await;

    let fetcher = FetcherImpl::new(mock_config(&server));
    let err = fetcher
        .fetch_raw(Symbol::Btc, Currency::Usd, 1, Provider::Coingecko)
        .await
        .unwrap_err();

    match err {
        FetchError::ResponseStatus {
            status, snippet, ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(snippet, "Not Found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_reports_unparseable_success_bodies_as_malformed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/coins/bitcoin/market_chart");
            then.status(200).body("<html>definitely not json</html>");
        })
        .await;

    let fetcher = FetcherImpl::new(mock_config(&server));
    let err = fetcher
        .fetch_raw(Symbol::Btc, Currency::Usd, 1, Provider::Coingecko)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::MalformedPayload(_)));
}

#[tokio::test]
async fn fetch_reports_timeouts_distinctly_from_transport_failures() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/coins/bitcoin/market_chart");
            then.status(200)
                .json_body(json!({ "prices": [] }))
                .delay(Duration::from_millis(1500));
        })
        .await;

    let fetcher = FetcherImpl::new(mock_config(&server));
    let err = fetcher
        .fetch_raw(Symbol::Btc, Currency::Usd, 1, Provider::Coingecko)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Timeout { .. }), "got {err:?}");
}

#[tokio::test]
async fn fetch_reports_connection_failures_as_transport() {
    let config = AppConfig {
        request_timeout_secs: 1,
        coingecko_api_base: "http://127.0.0.1:1".to_string(),
    };
    let fetcher = FetcherImpl::new(config);
    let err = fetcher
        .fetch_raw(Symbol::Btc, Currency::Usd, 1, Provider::Coingecko)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }), "got {err:?}");
}

#[tokio::test]
async fn fetch_propagates_capability_misses_without_a_network_call() {
    let fetcher = FetcherImpl::new(AppConfig {
        request_timeout_secs: 1,
        coingecko_api_base: "http://127.0.0.1:1".to_string(),
    });

    let err = fetcher
        .fetch_raw(Symbol::Unmapped, Currency::Usd, 1, Provider::Coingecko)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Capability(_)));

    let err = fetcher
        .fetch_raw(Symbol::Btc, Currency::Usd, 1, Provider::Binance)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Capability(_)));
}

// --- full pipeline ---

#[tokio::test]
async fn fetch_market_chart_yields_ordered_canonical_points() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/coins/ethereum/market_chart");
            then.status(200).json_body(json!({
                "prices": [
                    [1622592000000i64, 2600.0],
                    [1622505600000i64, 2500.0]
                ]
            }));
        })
        .await;

    let fetcher = FetcherImpl::new(mock_config(&server));
    let chart = coinscope::fetch_market_chart(
        &fetcher,
        Symbol::Eth,
        Currency::Usd,
        2,
        Provider::Coingecko,
    )
    .await
    .unwrap();

    assert_eq!(chart.symbol, Symbol::Eth);
    assert_eq!(chart.currency, Currency::Usd);
    assert_eq!(chart.points.len(), 2);
    assert!(chart.points[0].timestamp < chart.points[1].timestamp);
    assert_eq!(chart.points[0].price, 2500.0);
}
