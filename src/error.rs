//! Error types shared across the crate.
//!
//! Per-indicator problems are never errors at this level: they end up as
//! skipped entries in an [`AnalysisResult`](crate::analysis::AnalysisResult).
//! The types here cover the conditions that abort a whole request or the
//! process start.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Violations of the [`PriceFrame`](crate::frame::PriceFrame) invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    #[error("timestamps must be strictly ascending: {previous} is followed by {current}")]
    Unordered {
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },

    #[error("duplicate timestamp {0}")]
    DuplicateTimestamp(DateTime<Utc>),

    #[error("non-finite {column} value {value} at {timestamp}")]
    NonFinite {
        column: &'static str,
        value: f64,
        timestamp: DateTime<Utc>,
    },
}

/// Malformed catalog definitions. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("indicator `{0}` is defined more than once")]
    DuplicateName(String),

    #[error("indicator name `{0}` is not canonical (expected trimmed lowercase)")]
    NonCanonicalName(String),

    #[error("indicator `{0}` declares a minimum of zero bars")]
    ZeroMinBars(String),

    #[error("indicator `{name}` has no window for its default parameters: {reason}")]
    InvalidWindow { name: String, reason: String },

    #[error("indicator `{name}` lists backend `{backend}` more than once")]
    DuplicateBackend { name: String, backend: String },

    #[error("indicator `{name}` declares output `{suffix}` more than once")]
    DuplicateOutput { name: String, suffix: String },
}

/// Failures of the upstream price collaborators.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no price data for {ticker} on {exchange}")]
    NotFound { ticker: String, exchange: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed price data in {path}: {message}")]
    Malformed { path: String, message: String },

    #[error("invalid price frame: {0}")]
    Frame(#[from] FrameError),

    #[error("no provider could supply prices ({attempts})")]
    ProviderUnavailable { attempts: String },

    #[error("invalid {field} `{value}`: {reason}")]
    InvalidQuery {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Whole-request failures of the analysis entry point.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no data to compute indicators")]
    EmptyFrame,

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_error_messages() {
        let err = CatalogError::DuplicateName("rsi".to_string());
        assert_eq!(err.to_string(), "indicator `rsi` is defined more than once");

        let err = CatalogError::DuplicateBackend {
            name: "sma".to_string(),
            backend: "native".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "indicator `sma` lists backend `native` more than once"
        );
    }

    #[test]
    fn source_error_wraps_frame_error() {
        let ts = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        let err: SourceError = FrameError::DuplicateTimestamp(ts).into();
        assert!(err.to_string().starts_with("invalid price frame: duplicate timestamp"));
    }
}
