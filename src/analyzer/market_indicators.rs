use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::analyzer::table::{PriceFrame, validate_series};
use crate::model::{AnalyticsError, ResampleFrequency};

/// Resample output columns.
pub const OPEN_COLUMN: &str = "open";
pub const HIGH_COLUMN: &str = "high";
pub const LOW_COLUMN: &str = "low";
pub const CLOSE_COLUMN: &str = "close";

const DAY: i64 = 86_400;

/// Simple moving average over the trailing `window_size` rows, added as
/// `rolling_mean_{window_size}`.
///
/// The first `window_size − 1` rows have no full window behind them and
/// stay missing, as does any window containing a missing value.
pub fn compute_rolling_window(
    frame: &PriceFrame,
    window_size: usize,
    column: &str,
) -> Result<PriceFrame, AnalyticsError> {
    let values = validate_series(frame, column)?.to_vec();
    check_window(window_size, values.len(), 1)?;

    let means = rolling(&values, window_size, |window| {
        window.iter().sum::<f64>() / window.len() as f64
    });

    let mut out = frame.clone();
    out.push_column(&format!("rolling_mean_{window_size}"), means);
    Ok(out)
}

/// Rolling sample standard deviation, added as `volatility_{window_size}`,
/// with the same missing-prefix semantics as the rolling mean. The window
/// must cover at least two observations.
pub fn compute_volatility(
    frame: &PriceFrame,
    window_size: usize,
    column: &str,
) -> Result<PriceFrame, AnalyticsError> {
    let values = validate_series(frame, column)?.to_vec();
    check_window(window_size, values.len(), 2)?;

    let stds = rolling(&values, window_size, |window| {
        let mean = window.iter().sum::<f64>() / window.len() as f64;
        let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
            / (window.len() - 1) as f64;
        variance.sqrt()
    });

    let mut out = frame.clone();
    out.push_column(&format!("volatility_{window_size}"), stds);
    Ok(out)
}

/// Groups rows into calendar buckets and emits the column's first, max,
/// min, and last value per bucket as open/high/low/close.
///
/// Daily buckets are keyed by the UTC day they cover. Weekly buckets run
/// Monday through Sunday and are keyed by the Sunday that closes the week.
/// Buckets with no usable values are omitted; the output is ascending by
/// bucket timestamp. Rows are expected ascending, the order every frame
/// built by this crate carries.
pub fn resample_price_series(
    frame: &PriceFrame,
    column: &str,
    frequency: ResampleFrequency,
) -> Result<PriceFrame, AnalyticsError> {
    let values = validate_series(frame, column)?;

    let mut buckets: BTreeMap<DateTime<Utc>, Ohlc> = BTreeMap::new();
    for (ts, value) in frame.timestamps().iter().zip(values.iter()) {
        let Some(value) = *value else { continue };
        let Some(key) = bucket_key(*ts, frequency) else {
            continue;
        };
        buckets
            .entry(key)
            .and_modify(|bucket| bucket.update(value))
            .or_insert_with(|| Ohlc::new(value));
    }

    let mut timestamps = Vec::with_capacity(buckets.len());
    let mut open = Vec::with_capacity(buckets.len());
    let mut high = Vec::with_capacity(buckets.len());
    let mut low = Vec::with_capacity(buckets.len());
    let mut close = Vec::with_capacity(buckets.len());
    for (key, bucket) in buckets {
        timestamps.push(key);
        open.push(Some(bucket.open));
        high.push(Some(bucket.high));
        low.push(Some(bucket.low));
        close.push(Some(bucket.close));
    }

    let mut out = PriceFrame::new(timestamps);
    out.push_column(OPEN_COLUMN, open);
    out.push_column(HIGH_COLUMN, high);
    out.push_column(LOW_COLUMN, low);
    out.push_column(CLOSE_COLUMN, close);
    Ok(out)
}

struct Ohlc {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

impl Ohlc {
    fn new(value: f64) -> Self {
        Self {
            open: value,
            high: value,
            low: value,
            close: value,
        }
    }

    fn update(&mut self, value: f64) {
        if value > self.high {
            self.high = value;
        }
        if value < self.low {
            self.low = value;
        }
        self.close = value;
    }
}

fn bucket_key(ts: DateTime<Utc>, frequency: ResampleFrequency) -> Option<DateTime<Utc>> {
    let day = ts.timestamp().div_euclid(DAY);
    let key_day = match frequency {
        ResampleFrequency::Daily => day,
        // 1970-01-01 was a Thursday; shift by 3 so weeks start on Monday,
        // then key by the Sunday six days later.
        ResampleFrequency::Weekly => day - (day + 3).rem_euclid(7) + 6,
    };
    DateTime::from_timestamp(key_day * DAY, 0)
}

fn check_window(window_size: usize, rows: usize, min: usize) -> Result<(), AnalyticsError> {
    if window_size < min || window_size > rows {
        return Err(AnalyticsError::InvalidArgument(format!(
            "window size must be between {min} and the row count ({rows}), got {window_size}"
        )));
    }
    Ok(())
}

fn rolling(
    values: &[Option<f64>],
    window_size: usize,
    agg: impl Fn(&[f64]) -> f64,
) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    for end in window_size..=values.len() {
        let window: Option<Vec<f64>> = values[end - window_size..end].iter().copied().collect();
        out[end - 1] = window.map(|w| agg(&w));
    }
    out
}
