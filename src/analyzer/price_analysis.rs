use chrono::{DateTime, Utc};

use crate::analyzer::table::{PriceFrame, first_present, validate_series};
use crate::model::{AnalyticsError, SeriesStats, ValidationError};

/// Column added by [`compute_returns`]: period-over-period percent change.
pub const PCT_CHANGE_COLUMN: &str = "pct_change";
/// Column added by [`compute_returns`]: percent change from the first value.
pub const ACUM_PCT_CHANGE_COLUMN: &str = "acum_pct_change";

/// Calculates summary statistics over the non-missing values of a column.
///
/// Standard deviation and variance use the sample (N−1) definition; a
/// single observation yields 0 for both. Fails with an arithmetic error if
/// the first value is zero, since the percent change would be undefined.
pub fn compute_stats(frame: &PriceFrame, column: &str) -> Result<SeriesStats, AnalyticsError> {
    let values = validate_series(frame, column)?;
    let present: Vec<f64> = values.iter().flatten().copied().collect();

    let count = present.len();
    let min = present.iter().copied().fold(f64::INFINITY, f64::min);
    let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = present.iter().sum::<f64>() / count as f64;
    let variance = sample_variance(&present, mean);
    let first = present[0];
    let last = present[count - 1];
    if first == 0.0 {
        return Err(AnalyticsError::Arithmetic(
            "percent change is undefined when the first value is zero".to_string(),
        ));
    }

    Ok(SeriesStats {
        count,
        min,
        max,
        mean,
        median: median_of(&present),
        std_dev: variance.sqrt(),
        variance,
        first,
        last,
        percent_change: (last - first) / first * 100.0,
    })
}

/// Adds period-over-period (`pct_change`) and cumulative
/// (`acum_pct_change`) percent-change columns to a copy of the frame.
///
/// The first row has no prior value, so its `pct_change` is missing; the
/// cumulative change of the first value is 0. A zero denominator anywhere
/// fails the operation instead of emitting an infinity.
pub fn compute_returns(frame: &PriceFrame, column: &str) -> Result<PriceFrame, AnalyticsError> {
    let values = validate_series(frame, column)?.to_vec();

    let mut pct = vec![None; values.len()];
    for i in 1..values.len() {
        if let (Some(prev), Some(current)) = (values[i - 1], values[i]) {
            if prev == 0.0 {
                return Err(AnalyticsError::Arithmetic(
                    "period change is undefined over a zero value".to_string(),
                ));
            }
            pct[i] = Some((current - prev) / prev * 100.0);
        }
    }

    let base = series_base(&values, column)?;
    let acum = values
        .iter()
        .map(|value| value.map(|v| (v / base - 1.0) * 100.0))
        .collect();

    let mut out = frame.clone();
    out.push_column(PCT_CHANGE_COLUMN, pct);
    out.push_column(ACUM_PCT_CHANGE_COLUMN, acum);
    Ok(out)
}

/// Rescales a column so its first value becomes `base_value`, keeping every
/// other value's proportional relationship to it.
pub fn normalize_series(
    frame: &PriceFrame,
    column: &str,
    base_value: f64,
) -> Result<PriceFrame, AnalyticsError> {
    let values = validate_series(frame, column)?.to_vec();
    let first = series_base(&values, column)?;

    let scaled = values
        .iter()
        .map(|value| value.map(|v| v / first * base_value))
        .collect();

    let mut out = frame.clone();
    out.push_column(column, scaled);
    Ok(out)
}

/// Keeps only rows whose timestamp falls inside `[start, end]`, preserving
/// row order across every column. An empty result is valid, and re-trimming
/// with the same bounds is a no-op.
pub fn trim_date_range(frame: &PriceFrame, start: DateTime<Utc>, end: DateTime<Utc>) -> PriceFrame {
    let rows: Vec<usize> = frame
        .timestamps()
        .iter()
        .enumerate()
        .filter(|(_, ts)| **ts >= start && **ts <= end)
        .map(|(i, _)| i)
        .collect();
    frame.select_rows(&rows)
}

/// First non-missing value, rejected as a divisor when zero.
fn series_base(values: &[Option<f64>], column: &str) -> Result<f64, AnalyticsError> {
    let base = first_present(values)
        .ok_or_else(|| ValidationError::AllValuesMissing(column.to_string()))?;
    if base == 0.0 {
        return Err(AnalyticsError::Arithmetic(
            "the first value of the series is zero".to_string(),
        ));
    }
    Ok(base)
}

fn median_of(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn sample_variance(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}
