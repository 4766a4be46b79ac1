//! Price data from local CSV files laid out as `<root>/<EXCHANGE>/<TICKER>.csv`.
//!
//! Headers are matched case-insensitively. The date column may be called
//! `date`, `timestamp`, `time` or `datetime`; `close` is required and the
//! other price columns are optional. Empty cells are missing values.

use super::{PriceQuery, PriceSource};
use crate::error::SourceError;
use crate::frame::{Bar, Column, PriceFrame};
use crate::utils::{format_time, parse_timestamp};
use async_trait::async_trait;
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct CsvSource {
    root: PathBuf,
    name: String,
}

impl CsvSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = format!("csv:{}", root.display());
        Self { root, name }
    }

    /// Queries built by hand skip `PriceQuery::new`, so the fields are checked again here.
    pub fn path_for(&self, query: &PriceQuery) -> Result<PathBuf, SourceError> {
        query.validate()?;
        Ok(self
            .root
            .join(&query.exchange)
            .join(format!("{}.csv", query.ticker)))
    }
}

#[async_trait]
impl PriceSource for CsvSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_prices(&self, query: &PriceQuery) -> Result<PriceFrame, SourceError> {
        let path = self.path_for(query)?;
        debug!("Reading prices from {}", path.display());

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SourceError::NotFound {
                    ticker: query.ticker.clone(),
                    exchange: query.exchange.clone(),
                })
            }
            Err(e) => {
                return Err(SourceError::Io {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        let mut bars = parse_bars(bytes.as_slice(), &path)?;
        bars.sort_by_key(|bar| bar.time);
        bars.retain(|bar| {
            let date = bar.time.date_naive();
            date >= query.start && date <= query.end
        });

        if let (Some(first), Some(last)) = (bars.first(), bars.last()) {
            debug!(
                "{} rows for {}:{} between {} and {}",
                bars.len(),
                query.exchange,
                query.ticker,
                format_time(&first.time),
                format_time(&last.time)
            );
        }

        Ok(PriceFrame::from_bars(bars)?)
    }
}

fn is_date_header(header: &str) -> bool {
    matches!(header, "date" | "timestamp" | "time" | "datetime")
}

// Empty cells are missing values, never zero
fn parse_value(value: Option<&str>) -> Result<Option<f64>, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("cannot parse '{}' as number", text)),
    }
}

/// Parse CSV rows into bars, in file order.
pub(crate) fn parse_bars<R: Read>(reader: R, path: &Path) -> Result<Vec<Bar>, SourceError> {
    let malformed = |message: String| SourceError::Malformed {
        path: path.display().to_string(),
        message,
    };

    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| malformed(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let date_idx = headers
        .iter()
        .position(|h| is_date_header(h))
        .ok_or_else(|| malformed("no date column".to_string()))?;

    let column_map: HashMap<Column, usize> = Column::ALL
        .iter()
        .filter_map(|&column| {
            headers
                .iter()
                .position(|h| h == column.as_str())
                .map(|idx| (column, idx))
        })
        .collect();

    if !column_map.contains_key(&Column::Close) {
        return Err(malformed("no close column".to_string()));
    }

    let mut bars = Vec::new();
    for (line_idx, result) in csv_reader.records().enumerate() {
        // +2 for the header line and 0-indexing
        let line = line_idx + 2;
        let record = result.map_err(|e| malformed(format!("line {}: {}", line, e)))?;

        let raw_date = record.get(date_idx).unwrap_or("").trim();
        if raw_date.is_empty() && record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let time = parse_timestamp(raw_date)
            .ok_or_else(|| malformed(format!("line {}: invalid date '{}'", line, raw_date)))?;

        let value = |column: Column| -> Result<Option<f64>, SourceError> {
            match column_map.get(&column) {
                Some(&idx) => parse_value(record.get(idx))
                    .map_err(|message| malformed(format!("line {}: {}", line, message))),
                None => Ok(None),
            }
        };

        bars.push(Bar {
            time,
            open: value(Column::Open)?,
            high: value(Column::High)?,
            low: value(Column::Low)?,
            close: value(Column::Close)?,
            volume: value(Column::Volume)?,
        });
    }

    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Vec<Bar>, SourceError> {
        parse_bars(text.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn path_stays_under_the_root() {
        let source = CsvSource::new("/srv/prices");
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let query = PriceQuery::new("infy", "nse", date, date).unwrap();
        assert_eq!(source.path_for(&query).unwrap(), Path::new("/srv/prices/NSE/INFY.csv"));

        let escaping = PriceQuery {
            ticker: "../../etc/passwd".to_string(),
            ..query
        };
        assert!(matches!(
            source.path_for(&escaping),
            Err(SourceError::InvalidQuery { field: "ticker", .. })
        ));
    }

    #[test]
    fn parses_ohlcv_rows() {
        let bars = parse(
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-01,10,11,9,10.5,1000\n\
             2024-01-02,10.5,12,10,11.5,1500\n",
        )
        .unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].close, Some(11.5));
        assert_eq!(bars[1].volume, Some(1500.0));
    }

    #[test]
    fn empty_cells_are_missing() {
        let bars = parse(
            "timestamp,open,high,low,close,volume\n\
             2024-01-01T09:15:00Z,10,11,9,10.5,\n",
        )
        .unwrap();
        assert_eq!(bars[0].volume, None);
        assert_eq!(bars[0].open, Some(10.0));
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let bars = parse("date,close\n2024-01-01,10\n").unwrap();
        assert_eq!(bars[0].close, Some(10.0));
        assert_eq!(bars[0].high, None);
    }

    #[test]
    fn rejects_missing_close_column() {
        let err = parse("date,open\n2024-01-01,10\n").unwrap_err();
        assert!(err.to_string().contains("no close column"));
    }

    #[test]
    fn reports_bad_numbers_with_line() {
        let err = parse("date,close\n2024-01-01,10\n2024-01-02,abc\n").unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn reports_bad_dates() {
        let err = parse("date,close\nyesterday,10\n").unwrap_err();
        assert!(err.to_string().contains("invalid date 'yesterday'"));
    }
}
