//! JSON reports produced for the command line.

use crate::analysis::{AnalysisResult, SkippedIndicator};
use crate::backend::{Availability, Backend, BackendStatus};
use crate::catalog::{Catalog, Category, IndicatorSpec};
use crate::frame::Column;
use crate::resolver;
use crate::source::PriceQuery;
use crate::utils::format_date;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

fn number(value: Option<f64>) -> Value {
    value
        .filter(|v| v.is_finite())
        .map(Value::from)
        .unwrap_or(Value::Null)
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub ticker: String,
    pub exchange: String,
    pub start: String,
    pub end: String,
    pub rows: usize,
    /// One object per price row: date, price columns, indicator columns.
    pub data: Vec<Map<String, Value>>,
    pub computed_indicators: Vec<String>,
    pub skipped_indicators: Vec<SkippedIndicator>,
}

impl AnalysisReport {
    pub fn new(query: &PriceQuery, result: &AnalysisResult) -> Self {
        let frame = &result.frame;

        let data = frame
            .timestamps()
            .iter()
            .enumerate()
            .map(|(i, time)| {
                let mut row = Map::new();
                row.insert("date".to_string(), Value::String(time.to_rfc3339()));
                for column in Column::ALL {
                    row.insert(column.to_string(), number(frame.value(column, i)));
                }
                for (name, series) in &result.columns {
                    row.insert(name.clone(), number(series.get(i).copied().flatten()));
                }
                row
            })
            .collect();

        Self {
            ticker: query.ticker.clone(),
            exchange: query.exchange.clone(),
            start: format_date(&query.start),
            end: format_date(&query.end),
            rows: frame.len(),
            data,
            computed_indicators: result.computed.clone(),
            skipped_indicators: result.skipped.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorEntry {
    pub name: String,
    pub label: String,
    pub category: Category,
    pub inputs: Vec<Column>,
    pub params: BTreeMap<String, f64>,
    pub min_bars: usize,
    pub columns: Vec<String>,
    pub backends: Vec<Backend>,
    /// Backend a request would use right now, if any.
    pub resolved_backend: Option<Backend>,
}

impl IndicatorEntry {
    fn new(spec: &IndicatorSpec, resolved_backend: Option<Backend>) -> Self {
        Self {
            name: spec.name.to_string(),
            label: spec.label.to_string(),
            category: spec.category,
            inputs: spec.inputs.to_vec(),
            params: spec
                .params
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
            min_bars: spec.min_bars,
            columns: spec.column_names(),
            backends: spec.backends(),
            resolved_backend,
        }
    }
}

/// What the catalog knows and what this process can compute right now.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryReport {
    pub backends: Vec<BackendStatus>,
    pub supported: Vec<IndicatorEntry>,
    pub available_now: Vec<IndicatorEntry>,
    pub total_supported: usize,
    pub total_available: usize,
}

impl DiscoveryReport {
    pub fn build(catalog: &Catalog, availability: &Availability) -> Self {
        let supported: Vec<IndicatorEntry> = catalog
            .list_all()
            .iter()
            .map(|spec| {
                let resolved = resolver::resolve(catalog, availability, spec.name)
                    .ok()
                    .map(|(_, backend)| backend);
                IndicatorEntry::new(spec, resolved)
            })
            .collect();

        let available_now: Vec<IndicatorEntry> = supported
            .iter()
            .filter(|entry| entry.resolved_backend.is_some())
            .cloned()
            .collect();

        Self {
            backends: availability.statuses().to_vec(),
            total_supported: supported.len(),
            total_available: available_now.len(),
            supported,
            available_now,
        }
    }
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;
    use crate::frame::{Bar, PriceFrame};
    use chrono::{DateTime, Duration, NaiveDate, Utc};

    fn frame(rows: usize) -> PriceFrame {
        let start = DateTime::<Utc>::from_timestamp(1_704_067_200, 0).unwrap();
        PriceFrame::from_bars((0..rows).map(|i| {
            let p = 50.0 + i as f64;
            let mut bar = Bar::new(start + Duration::days(i as i64), p, p + 1.0, p - 1.0, p, 10.0);
            if i == 1 {
                bar.volume = None;
            }
            bar
        }))
        .unwrap()
    }

    fn query() -> PriceQuery {
        PriceQuery::new(
            "infy",
            "nse",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn analysis_report_rows_carry_prices_and_indicators() {
        let catalog = Catalog::builtin().unwrap();
        let availability = Availability::from_flags(&[(Backend::Native, true)]);
        let result = Analyzer::new(&catalog, &availability).run(&["sma", "bogus"], &frame(25));

        let report = AnalysisReport::new(&query(), &result);
        let json: Value = serde_json::to_value(&report).unwrap();

        assert_eq!(json["ticker"], "INFY");
        assert_eq!(json["exchange"], "NSE");
        assert_eq!(json["start"], "2024-01-01");
        assert_eq!(json["rows"], 25);
        assert_eq!(json["data"][0]["date"], "2024-01-01T00:00:00+00:00");
        assert_eq!(json["data"][0]["close"], 50.0);
        assert!(json["data"][1]["volume"].is_null());
        assert!(json["data"][0]["SMA"].is_null());
        assert!(json["data"][19]["SMA"].is_number());
        assert_eq!(json["computed_indicators"], serde_json::json!(["sma"]));
        assert_eq!(json["skipped_indicators"][0]["name"], "bogus");
        assert_eq!(json["skipped_indicators"][0]["reason"], "unknown_indicator");
        assert!(json["skipped_indicators"][0]["backend"].is_null());
    }

    #[test]
    fn discovery_counts_only_resolvable_indicators() {
        let catalog = Catalog::builtin().unwrap();
        let availability = Availability::from_flags(&[(Backend::Native, true)]);
        let report = DiscoveryReport::build(&catalog, &availability);

        assert_eq!(report.total_supported, catalog.len());
        assert!(report.total_available < report.total_supported);
        assert!(report.available_now.iter().all(|e| e.resolved_backend == Some(Backend::Native)));
        assert!(report.available_now.iter().any(|e| e.name == "vwap"));
        assert!(!report.available_now.iter().any(|e| e.name == "adx"));
        assert_eq!(report.backends.len(), 3);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["backends"][0]["backend"], "talib");
        let bbands = report.supported.iter().find(|e| e.name == "bbands").unwrap();
        assert_eq!(bbands.params.get("std"), Some(&2.0));
        assert_eq!(bbands.backends, vec![Backend::TaLib, Backend::Ta, Backend::Native]);
    }
}
