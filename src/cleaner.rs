//! Converts raw market-chart payloads into canonical price points.

use serde_json::Value;

use crate::model::{FetchError, PricePoint};
use crate::utils::datetime_from_millis;

/// Converts a raw payload into an ordered sequence of price points.
///
/// The payload must carry a `prices` array of `[epoch_millis, price]`
/// pairs; any other shape fails the whole conversion with
/// [`FetchError::MalformedPayload`] — either every pair converts or none
/// do. Epoch milliseconds are interpreted as UTC. The returned points are
/// sorted ascending by timestamp; the provider is expected to answer in
/// order, but nothing upstream guarantees it.
pub fn clean(raw: &Value) -> Result<Vec<PricePoint>, FetchError> {
    let prices = raw
        .get("prices")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            FetchError::MalformedPayload("payload has no \"prices\" array".to_string())
        })?;

    let mut points = Vec::with_capacity(prices.len());
    for (index, entry) in prices.iter().enumerate() {
        points.push(clean_pair(index, entry)?);
    }

    points.sort_by_key(|p| p.timestamp);
    Ok(points)
}

fn clean_pair(index: usize, entry: &Value) -> Result<PricePoint, FetchError> {
    let pair = entry
        .as_array()
        .filter(|pair| pair.len() == 2)
        .ok_or_else(|| malformed(index, "expected a [timestamp, price] pair"))?;

    let millis = pair[0]
        .as_i64()
        .ok_or_else(|| malformed(index, "timestamp is not an integer"))?;
    let timestamp =
        datetime_from_millis(millis).ok_or_else(|| malformed(index, "timestamp is out of range"))?;

    let price = pair[1]
        .as_f64()
        .filter(|price| price.is_finite())
        .ok_or_else(|| malformed(index, "price is not a finite number"))?;

    Ok(PricePoint { timestamp, price })
}

fn malformed(index: usize, what: &str) -> FetchError {
    FetchError::MalformedPayload(format!("prices[{index}]: {what}"))
}
