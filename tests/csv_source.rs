use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use indicator_analysis::analysis::Analyzer;
use indicator_analysis::backend::{Availability, Backend};
use indicator_analysis::catalog::Catalog;
use indicator_analysis::error::{AnalysisError, SourceError};
use indicator_analysis::source::{CsvSource, FallbackSource, PriceQuery, PriceSource};

struct TempRoot(PathBuf);

impl TempRoot {
    fn new() -> Self {
        let path = std::env::temp_dir().join(format!("indicator-analysis-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&path).unwrap();
        TempRoot(path)
    }

    fn write(&self, exchange: &str, ticker: &str, contents: &str) {
        let dir = self.0.join(exchange);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{}.csv", ticker)), contents).unwrap();
    }
}

impl Drop for TempRoot {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.0).ok();
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn prices(days: u32) -> String {
    let mut csv = String::from("Date,Open,High,Low,Close,Volume\n");
    for day in 0..days {
        let close = 100.0 + day as f64;
        let date = date(2024, 1, 1) + chrono::Duration::days(day as i64);
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            date,
            close - 0.5,
            close + 1.0,
            close - 1.0,
            close,
            1000 + day
        ));
    }
    csv
}

#[tokio::test]
async fn reads_and_filters_by_date() {
    let root = TempRoot::new();
    root.write("NSE", "INFY", &prices(40));
    let source = CsvSource::new(&root.0);

    let query = PriceQuery::new("infy", "nse", date(2024, 1, 5), date(2024, 1, 14)).unwrap();
    let frame = source.fetch_prices(&query).await.unwrap();

    assert_eq!(frame.len(), 10);
    assert_eq!(frame.close()[0], 104.0);
    assert_eq!(frame.timestamps()[9].date_naive(), date(2024, 1, 14));
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let root = TempRoot::new();
    let source = CsvSource::new(&root.0);

    let query = PriceQuery::new("TCS", "NSE", date(2024, 1, 1), date(2024, 2, 1)).unwrap();
    let err = source.fetch_prices(&query).await.unwrap_err();

    assert!(matches!(err, SourceError::NotFound { ref ticker, .. } if ticker == "TCS"));
}

#[tokio::test]
async fn queries_cannot_escape_the_data_directory() {
    let root = TempRoot::new();
    root.write("NSE", "INFY", &prices(10));
    let source = CsvSource::new(root.0.join("NSE"));

    // A hand-built query bypasses the constructor checks
    let query = PriceQuery {
        ticker: "INFY".to_string(),
        exchange: "..".to_string(),
        start: date(2024, 1, 1),
        end: date(2024, 2, 1),
    };
    let err = source.fetch_prices(&query).await.unwrap_err();
    assert!(matches!(err, SourceError::InvalidQuery { field: "exchange", .. }), "{:?}", err);

    assert!(PriceQuery::new("../NSE/INFY", "NSE", date(2024, 1, 1), date(2024, 2, 1)).is_err());
}

#[tokio::test]
async fn malformed_rows_report_their_line() {
    let root = TempRoot::new();
    root.write("NSE", "BAD", "date,close\n2024-01-01,10\n2024-01-02,abc\n");
    let source = CsvSource::new(&root.0);

    let query = PriceQuery::new("BAD", "NSE", date(2024, 1, 1), date(2024, 2, 1)).unwrap();
    match source.fetch_prices(&query).await.unwrap_err() {
        SourceError::Malformed { message, .. } => assert!(message.contains("line 3"), "{}", message),
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn fallback_uses_the_next_source() {
    let primary = TempRoot::new();
    let backup = TempRoot::new();
    backup.write("NSE", "INFY", &prices(30));

    let source = FallbackSource::new(vec![
        Arc::new(CsvSource::new(&primary.0)) as Arc<dyn PriceSource>,
        Arc::new(CsvSource::new(&backup.0)),
    ]);

    let query = PriceQuery::new("INFY", "NSE", date(2024, 1, 1), date(2024, 12, 31)).unwrap();
    assert_eq!(source.fetch_prices(&query).await.unwrap().len(), 30);
}

#[tokio::test]
async fn fallback_reports_every_attempt() {
    let primary = TempRoot::new();
    let backup = TempRoot::new();
    // rows exist but none fall inside the query window
    backup.write("NSE", "INFY", &prices(5));

    let source = FallbackSource::new(vec![
        Arc::new(CsvSource::new(&primary.0)) as Arc<dyn PriceSource>,
        Arc::new(CsvSource::new(&backup.0)),
    ]);

    let query = PriceQuery::new("INFY", "NSE", date(2025, 1, 1), date(2025, 2, 1)).unwrap();
    match source.fetch_prices(&query).await.unwrap_err() {
        SourceError::ProviderUnavailable { attempts } => {
            assert!(attempts.contains("no rows"), "{}", attempts);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn fetch_and_analyze_end_to_end() {
    let root = TempRoot::new();
    root.write("NSE", "INFY", &prices(60));
    let source = CsvSource::new(&root.0);
    let catalog = Catalog::builtin().unwrap();
    let availability = Availability::from_flags(&[(Backend::Native, true)]);
    let analyzer = Analyzer::new(&catalog, &availability).parallel(true);

    let query = PriceQuery::new("INFY", "NSE", date(2024, 1, 1), date(2024, 12, 31)).unwrap();
    let result = analyzer
        .fetch_and_analyze(&source, &query, &["rsi", "sma", "missing"])
        .await
        .unwrap();

    assert_eq!(result.computed, vec!["rsi", "sma"]);
    assert_eq!(result.skipped.len(), 1);

    let missing = PriceQuery::new("NOPE", "NSE", date(2024, 1, 1), date(2024, 12, 31)).unwrap();
    let err = analyzer.fetch_and_analyze(&source, &missing, &["rsi"]).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Source(SourceError::NotFound { .. })));
}
