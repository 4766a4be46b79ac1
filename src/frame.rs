//! OHLCV price frame: the single input of every indicator computation.

use crate::error::FrameError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Price columns every frame carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Open,
        Column::High,
        Column::Low,
        Column::Close,
        Column::Volume,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Open => "open",
            Column::High => "high",
            Column::Low => "low",
            Column::Close => "close",
            Column::Volume => "volume",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input row. `None` (or `NaN`) marks a missing value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub time: DateTime<Utc>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

impl Bar {
    /// Convenience constructor for a fully populated row.
    pub fn new(time: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            volume: Some(volume),
        }
    }
}

/// Column-oriented OHLCV series.
///
/// Invariants enforced on construction: timestamps strictly ascending (which
/// also rules out duplicates) and no infinite values. Missing values are kept
/// as `NaN` and are never coerced to zero. A frame is immutable once built;
/// indicator output lives in separate columns of the analysis result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceFrame {
    timestamps: Vec<DateTime<Utc>>,
    open: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
    volume: Vec<f64>,
}

impl PriceFrame {
    pub fn from_bars<I>(bars: I) -> Result<Self, FrameError>
    where
        I: IntoIterator<Item = Bar>,
    {
        let bars = bars.into_iter();
        let (lower, _) = bars.size_hint();
        let mut frame = Self {
            timestamps: Vec::with_capacity(lower),
            open: Vec::with_capacity(lower),
            high: Vec::with_capacity(lower),
            low: Vec::with_capacity(lower),
            close: Vec::with_capacity(lower),
            volume: Vec::with_capacity(lower),
        };

        for bar in bars {
            if let Some(&previous) = frame.timestamps.last() {
                if bar.time == previous {
                    return Err(FrameError::DuplicateTimestamp(bar.time));
                }
                if bar.time < previous {
                    return Err(FrameError::Unordered {
                        previous,
                        current: bar.time,
                    });
                }
            }

            frame.open.push(checked(Column::Open, bar.open, bar.time)?);
            frame.high.push(checked(Column::High, bar.high, bar.time)?);
            frame.low.push(checked(Column::Low, bar.low, bar.time)?);
            frame.close.push(checked(Column::Close, bar.close, bar.time)?);
            frame.volume.push(checked(Column::Volume, bar.volume, bar.time)?);
            frame.timestamps.push(bar.time);
        }

        Ok(frame)
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

    /// Raw column values; `NaN` marks a missing value.
    pub fn column(&self, column: Column) -> &[f64] {
        match column {
            Column::Open => &self.open,
            Column::High => &self.high,
            Column::Low => &self.low,
            Column::Close => &self.close,
            Column::Volume => &self.volume,
        }
    }

    pub fn open(&self) -> &[f64] {
        &self.open
    }

    pub fn high(&self) -> &[f64] {
        &self.high
    }

    pub fn low(&self) -> &[f64] {
        &self.low
    }

    pub fn close(&self) -> &[f64] {
        &self.close
    }

    pub fn volume(&self) -> &[f64] {
        &self.volume
    }

    pub fn value(&self, column: Column, index: usize) -> Option<f64> {
        self.column(column)
            .get(index)
            .copied()
            .filter(|v| !v.is_nan())
    }

    /// Number of rows where every one of `columns` has a value.
    pub fn usable_rows(&self, columns: &[Column]) -> usize {
        (0..self.len())
            .filter(|&i| self.is_usable(columns, i))
            .count()
    }

    /// The rows where every one of `columns` has a value, compacted.
    pub fn usable(&self, columns: &[Column]) -> Usable {
        let rows: Vec<usize> = (0..self.len())
            .filter(|&i| self.is_usable(columns, i))
            .collect();
        let values = columns
            .iter()
            .map(|&c| {
                let column = self.column(c);
                rows.iter().map(|&i| column[i]).collect()
            })
            .collect();

        Usable {
            rows,
            columns: values,
            total: self.len(),
        }
    }

    fn is_usable(&self, columns: &[Column], index: usize) -> bool {
        columns.iter().all(|&c| !self.column(c)[index].is_nan())
    }
}

/// Gap-free view over the usable rows of a frame.
///
/// Formulas run on the compacted columns; [`Usable::expand`] puts the results
/// back on the frame's rows, leaving skipped rows undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct Usable {
    rows: Vec<usize>,
    columns: Vec<Vec<f64>>,
    total: usize,
}

impl Usable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when no row was skipped.
    pub fn is_complete(&self) -> bool {
        self.rows.len() == self.total
    }

    /// Compacted values of the `index`-th requested column.
    pub fn column(&self, index: usize) -> &[f64] {
        self.columns.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn expand(&self, values: &[f64]) -> Vec<f64> {
        let mut expanded = vec![f64::NAN; self.total];
        for (&row, &value) in self.rows.iter().zip(values) {
            expanded[row] = value;
        }
        expanded
    }
}

fn checked(column: Column, value: Option<f64>, time: DateTime<Utc>) -> Result<f64, FrameError> {
    match value {
        None => Ok(f64::NAN),
        Some(v) if v.is_nan() => Ok(f64::NAN),
        Some(v) if v.is_infinite() => Err(FrameError::NonFinite {
            column: column.as_str(),
            value: v,
            timestamp: time,
        }),
        Some(v) => Ok(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(n: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap() + Duration::days(n)
    }

    #[test]
    fn builds_columns_in_order() {
        let frame = PriceFrame::from_bars(vec![
            Bar::new(day(0), 1.0, 2.0, 0.5, 1.5, 100.0),
            Bar::new(day(1), 1.5, 2.5, 1.0, 2.0, 200.0),
        ])
        .unwrap();

        assert_eq!(frame.len(), 2);
        assert_eq!(frame.close(), &[1.5, 2.0]);
        assert_eq!(frame.column(Column::Volume), &[100.0, 200.0]);
        assert_eq!(frame.timestamps()[1], day(1));
    }

    #[test]
    fn rejects_duplicate_timestamps() {
        let err = PriceFrame::from_bars(vec![
            Bar::new(day(0), 1.0, 1.0, 1.0, 1.0, 1.0),
            Bar::new(day(0), 1.0, 1.0, 1.0, 1.0, 1.0),
        ])
        .unwrap_err();
        assert_eq!(err, FrameError::DuplicateTimestamp(day(0)));
    }

    #[test]
    fn rejects_descending_timestamps() {
        let err = PriceFrame::from_bars(vec![
            Bar::new(day(2), 1.0, 1.0, 1.0, 1.0, 1.0),
            Bar::new(day(1), 1.0, 1.0, 1.0, 1.0, 1.0),
        ])
        .unwrap_err();
        assert!(matches!(err, FrameError::Unordered { .. }));
    }

    #[test]
    fn rejects_infinite_values() {
        let err = PriceFrame::from_bars(vec![Bar::new(day(0), 1.0, f64::INFINITY, 1.0, 1.0, 1.0)])
            .unwrap_err();
        assert!(matches!(err, FrameError::NonFinite { column: "high", .. }));
    }

    #[test]
    fn missing_values_stay_missing() {
        let mut bar = Bar::new(day(0), 1.0, 2.0, 0.5, 1.5, 100.0);
        bar.volume = None;
        let frame = PriceFrame::from_bars(vec![bar, Bar::new(day(1), 1.0, 2.0, 0.5, 1.5, 10.0)]).unwrap();

        assert_eq!(frame.value(Column::Volume, 0), None);
        assert_eq!(frame.value(Column::Volume, 1), Some(10.0));
        assert_eq!(frame.usable_rows(&[Column::Close]), 2);
        assert_eq!(frame.usable_rows(&[Column::Close, Column::Volume]), 1);
    }

    #[test]
    fn usable_view_skips_and_restores_gaps() {
        let mut middle = Bar::new(day(1), 2.0, 2.0, 2.0, 2.0, 2.0);
        middle.close = None;
        let frame = PriceFrame::from_bars(vec![
            Bar::new(day(0), 1.0, 1.0, 1.0, 1.0, 1.0),
            middle,
            Bar::new(day(2), 3.0, 3.0, 3.0, 3.0, 3.0),
        ])
        .unwrap();

        let usable = frame.usable(&[Column::Close, Column::Volume]);
        assert_eq!(usable.len(), 2);
        assert!(!usable.is_complete());
        assert_eq!(usable.column(0), &[1.0, 3.0]);
        assert_eq!(usable.column(1), &[1.0, 3.0]);

        let expanded = usable.expand(&[10.0, 30.0]);
        assert_eq!(expanded[0], 10.0);
        assert!(expanded[1].is_nan());
        assert_eq!(expanded[2], 30.0);
    }
}
