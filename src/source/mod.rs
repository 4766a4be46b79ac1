//! Upstream price providers.

mod local;

pub use self::local::CsvSource;

use crate::error::SourceError;
use crate::frame::PriceFrame;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

/// What to fetch. Dates are inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuery {
    pub ticker: String,
    pub exchange: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PriceQuery {
    /// Ticker and exchange become path components of file-backed sources, so
    /// anything that could leave the data directory is rejected.
    pub fn new(ticker: &str, exchange: &str, start: NaiveDate, end: NaiveDate) -> Result<Self, SourceError> {
        let query = Self {
            ticker: ticker.trim().to_uppercase(),
            exchange: exchange.trim().to_uppercase(),
            start,
            end,
        };
        query.validate()?;
        Ok(query)
    }

    pub fn validate(&self) -> Result<(), SourceError> {
        path_component("ticker", &self.ticker)?;
        path_component("exchange", &self.exchange)
    }
}

fn path_component(field: &'static str, value: &str) -> Result<(), SourceError> {
    let reason = if value.is_empty() {
        "must not be empty"
    } else if value.contains(['/', '\\']) {
        "must not contain a path separator"
    } else if value.contains("..") {
        "must not contain `..`"
    } else if value.chars().any(char::is_control) {
        "must not contain control characters"
    } else {
        return Ok(());
    };

    Err(SourceError::InvalidQuery {
        field,
        value: value.to_string(),
        reason,
    })
}

#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    async fn fetch_prices(&self, query: &PriceQuery) -> Result<PriceFrame, SourceError>;
}

/// Tries each source in order until one returns a non-empty frame.
pub struct FallbackSource {
    sources: Vec<Arc<dyn PriceSource>>,
}

impl FallbackSource {
    pub fn new(sources: Vec<Arc<dyn PriceSource>>) -> Self {
        Self { sources }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[async_trait]
impl PriceSource for FallbackSource {
    fn name(&self) -> &str {
        "fallback"
    }

    async fn fetch_prices(&self, query: &PriceQuery) -> Result<PriceFrame, SourceError> {
        let mut attempts = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            match source.fetch_prices(query).await {
                Ok(frame) if !frame.is_empty() => {
                    info!(
                        "Fetched {} rows for {}:{} from {}",
                        frame.len(),
                        query.exchange,
                        query.ticker,
                        source.name()
                    );
                    return Ok(frame);
                }
                Ok(_) => {
                    warn!(
                        "{} returned no rows for {}:{}, trying next source",
                        source.name(),
                        query.exchange,
                        query.ticker
                    );
                    attempts.push(format!("{}: no rows", source.name()));
                }
                Err(e) => {
                    warn!(
                        "{} failed for {}:{}: {}, trying next source",
                        source.name(),
                        query.exchange,
                        query.ticker,
                        e
                    );
                    attempts.push(format!("{}: {}", source.name(), e));
                }
            }
        }

        if attempts.is_empty() {
            attempts.push("no sources configured".to_string());
        }

        Err(SourceError::ProviderUnavailable {
            attempts: attempts.join("; "),
        })
    }
}
