use chrono::{DateTime, Utc};

use crate::model::{MarketChartData, ValidationError};

/// Name of the base column every chart-derived frame starts with.
pub const PRICE_COLUMN: &str = "price";

/// Column-oriented table: one timestamp axis plus named numeric columns.
///
/// Missing values are explicit `None`s, and every column stays aligned
/// row-for-row with the timestamp axis. Operations that reshape rows build
/// a new frame rather than mutating in place.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceFrame {
    timestamps: Vec<DateTime<Utc>>,
    columns: Vec<(String, Vec<Option<f64>>)>,
}

impl PriceFrame {
    pub fn new(timestamps: Vec<DateTime<Utc>>) -> Self {
        Self {
            timestamps,
            columns: Vec::new(),
        }
    }

    /// Builds a frame with a single `price` column from chart data.
    pub fn from_market_chart(chart: &MarketChartData) -> Self {
        let timestamps = chart.points.iter().map(|p| p.timestamp).collect();
        let prices = chart.points.iter().map(|p| Some(p.price)).collect();
        let mut frame = Self::new(timestamps);
        frame.push_column(PRICE_COLUMN, prices);
        frame
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Adds a column, replacing any column of the same name.
    ///
    /// # Panics
    /// Panics if the values do not align with the timestamp axis.
    pub fn push_column(&mut self, name: &str, values: Vec<Option<f64>>) {
        assert_eq!(
            values.len(),
            self.timestamps.len(),
            "column must align with the timestamp axis"
        );
        if let Some(existing) = self.columns.iter_mut().find(|(n, _)| n == name) {
            existing.1 = values;
        } else {
            self.columns.push((name.to_string(), values));
        }
    }

    /// New frame holding the given rows of every column, in the given order.
    pub(crate) fn select_rows(&self, rows: &[usize]) -> Self {
        let timestamps = rows.iter().map(|&i| self.timestamps[i]).collect();
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| (name.clone(), rows.iter().map(|&i| values[i]).collect()))
            .collect();
        Self {
            timestamps,
            columns,
        }
    }
}

/// Precondition gate run by every column-oriented analytics operation.
pub fn validate_series<'a>(
    frame: &'a PriceFrame,
    column: &str,
) -> Result<&'a [Option<f64>], ValidationError> {
    if frame.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    if column.trim().is_empty() {
        return Err(ValidationError::InvalidColumn);
    }
    let values = frame
        .column(column)
        .ok_or_else(|| ValidationError::ColumnNotFound(column.to_string()))?;
    if values.iter().all(Option::is_none) {
        return Err(ValidationError::AllValuesMissing(column.to_string()));
    }
    Ok(values)
}

/// First non-missing value of a column, the anchor for percent-change and
/// normalization bases.
pub(crate) fn first_present(values: &[Option<f64>]) -> Option<f64> {
    values.iter().flatten().copied().next()
}
