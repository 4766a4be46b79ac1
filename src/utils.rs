use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::future::Future;
use std::time::Instant;
use tracing::debug;

// Utility function to measure execution time of operations
pub async fn measure_time<F, T>(operation_name: &str, f: F) -> T
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let result = f.await;
    debug!("{} completed in {:.2?}", operation_name, start.elapsed());
    result
}

// Format a timestamp for logging
pub fn format_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

// Calendar date as used in reports and on the command line
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// Parse a YYYY-MM-DD date (clap value parser)
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date `{}` (expected YYYY-MM-DD): {}", value, e))
}

// Accepts RFC 3339, "YYYY-MM-DD HH:MM:SS" (taken as UTC) or a bare date (midnight UTC)
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Some(time.with_timezone(&Utc));
    }
    if let Ok(time) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(time.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_supported_timestamp_formats() {
        let rfc = parse_timestamp("2024-03-01T09:15:00+05:30").unwrap();
        assert_eq!(rfc.hour(), 3);
        assert_eq!(rfc.minute(), 45);

        let plain = parse_timestamp("2024-03-01 10:00:00").unwrap();
        assert_eq!(plain.hour(), 10);

        let date = parse_timestamp(" 2024-03-01 ").unwrap();
        assert_eq!(date.day(), 1);
        assert_eq!(date.hour(), 0);

        assert!(parse_timestamp("01/03/2024").is_none());
    }

    #[test]
    fn date_round_trip_for_reports() {
        let date = parse_date("2024-02-29").unwrap();
        assert_eq!(format_date(&date), "2024-02-29");
        assert!(parse_date("2023-02-29").is_err());
    }
}
