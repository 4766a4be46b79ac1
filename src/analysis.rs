//! Request orchestration: resolve, compute and merge every requested indicator.

use crate::backend::{Availability, Backend};
use crate::catalog::{canonical_name, Catalog, DEFAULT_INDICATORS};
use crate::dispatch::{self, ComputationOutcome, FailureReason, Params, Series};
use crate::error::AnalysisError;
use crate::frame::PriceFrame;
use crate::resolver;
use crate::source::{PriceQuery, PriceSource};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// A requested indicator that produced no output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedIndicator {
    pub name: String,
    pub reason: FailureReason,
    pub detail: String,
    /// Backend that was tried, when one was selected.
    pub backend: Option<Backend>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// Input prices, unchanged.
    pub frame: PriceFrame,
    /// Indicator columns in request order.
    pub columns: Vec<(String, Series)>,
    pub computed: Vec<String>,
    pub skipped: Vec<SkippedIndicator>,
}

impl AnalysisResult {
    pub fn column(&self, name: &str) -> Option<&Series> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, series)| series)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn skipped(&self, name: &str) -> Option<&SkippedIndicator> {
        self.skipped.iter().find(|s| s.name == name)
    }
}

/// Canonical names in first-occurrence order, without duplicates.
pub fn dedup_names<S: AsRef<str>>(requested: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    requested
        .iter()
        .map(|name| canonical_name(name.as_ref()))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// `requested`, or the default set when it names nothing.
pub fn requested_or_default(requested: &[String]) -> Vec<String> {
    if requested.iter().all(|name| name.trim().is_empty()) {
        DEFAULT_INDICATORS.iter().map(|name| name.to_string()).collect()
    } else {
        requested.to_vec()
    }
}

type Evaluation = Result<(Vec<(String, Series)>, Backend), SkippedIndicator>;

pub struct Analyzer<'a> {
    catalog: &'a Catalog,
    availability: &'a Availability,
    parallel: bool,
    overrides: HashMap<String, Params>,
}

impl<'a> Analyzer<'a> {
    pub fn new(catalog: &'a Catalog, availability: &'a Availability) -> Self {
        Self {
            catalog,
            availability,
            parallel: false,
            overrides: HashMap::new(),
        }
    }

    /// Compute indicators on the rayon pool. Result order is unaffected.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Override catalog defaults for one indicator.
    pub fn with_params(mut self, name: &str, params: Params) -> Self {
        self.overrides.insert(canonical_name(name), params);
        self
    }

    /// Compute every requested indicator on `frame`.
    ///
    /// Never fails as a whole: each indicator either contributes its columns
    /// to the result or is listed in `skipped` with a reason.
    #[instrument(
        skip(self, requested, frame),
        fields(request_id = %Uuid::new_v4(), rows = frame.len())
    )]
    pub fn run<S: AsRef<str>>(&self, requested: &[S], frame: &PriceFrame) -> AnalysisResult {
        let names = dedup_names(requested);

        let evaluations: Vec<Evaluation> = if self.parallel {
            names.par_iter().map(|name| self.evaluate(name, frame)).collect()
        } else {
            names.iter().map(|name| self.evaluate(name, frame)).collect()
        };

        let mut result = AnalysisResult {
            frame: frame.clone(),
            columns: Vec::new(),
            computed: Vec::new(),
            skipped: Vec::new(),
        };

        for (name, evaluation) in names.into_iter().zip(evaluations) {
            match evaluation {
                Ok((columns, _)) => {
                    result.columns.extend(columns);
                    result.computed.push(name);
                }
                Err(skipped) => result.skipped.push(skipped),
            }
        }

        info!(
            "Computed {} indicators, skipped {}",
            result.computed.len(),
            result.skipped.len()
        );

        result
    }

    /// Reject an empty frame, then [`run`](Self::run).
    pub fn analyze<S: AsRef<str>>(
        &self,
        requested: &[S],
        frame: &PriceFrame,
    ) -> Result<AnalysisResult, AnalysisError> {
        if frame.is_empty() {
            return Err(AnalysisError::EmptyFrame);
        }
        Ok(self.run(requested, frame))
    }

    /// Fetch prices for `query` and analyze them.
    pub async fn fetch_and_analyze<S: AsRef<str>>(
        &self,
        source: &dyn PriceSource,
        query: &PriceQuery,
        requested: &[S],
    ) -> Result<AnalysisResult, AnalysisError> {
        let frame = source.fetch_prices(query).await?;
        self.analyze(requested, &frame)
    }

    fn params_for(&self, name: &str, defaults: Params) -> Params {
        match self.overrides.get(name) {
            Some(overrides) => overrides
                .iter()
                .fold(defaults, |params, (key, value)| params.with(key, value)),
            None => defaults,
        }
    }

    fn evaluate(&self, name: &str, frame: &PriceFrame) -> Evaluation {
        let (spec, backend) = match resolver::resolve(self.catalog, self.availability, name) {
            Ok(resolved) => resolved,
            Err(failure) => {
                debug!("{} not resolved: {}", name, failure);
                return Err(SkippedIndicator {
                    name: name.to_string(),
                    reason: failure.reason,
                    detail: failure.detail,
                    backend: None,
                });
            }
        };

        debug!("{} resolved to {}", spec.name, backend);

        let params = self.params_for(spec.name, spec.default_params());
        match dispatch::compute(backend, spec, frame, &params) {
            ComputationOutcome::Success { columns, backend } => Ok((columns, backend)),
            ComputationOutcome::Failure(failure) => Err(SkippedIndicator {
                name: name.to_string(),
                reason: failure.reason,
                detail: failure.detail,
                backend: Some(backend),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Bar;
    use chrono::{DateTime, Duration, Utc};

    fn frame(rows: usize) -> PriceFrame {
        let start = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        PriceFrame::from_bars((0..rows).map(|i| {
            let p = 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.1;
            Bar::new(start + Duration::days(i as i64), p - 0.5, p + 1.0, p - 1.0, p, 1000.0 + i as f64)
        }))
        .unwrap()
    }

    fn native_only() -> Availability {
        Availability::from_flags(&[(Backend::Native, true)])
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        assert_eq!(
            dedup_names(&["RSI", "sma", " rsi ", "SMA", "ema"]),
            vec!["rsi", "sma", "ema"]
        );
    }

    #[test]
    fn empty_request_uses_defaults() {
        assert_eq!(requested_or_default(&[]).len(), DEFAULT_INDICATORS.len());
        assert_eq!(
            requested_or_default(&["rsi".to_string()]),
            vec!["rsi".to_string()]
        );
    }

    #[test]
    fn computes_and_skips_in_request_order() {
        let catalog = Catalog::builtin().unwrap();
        let availability = native_only();
        let analyzer = Analyzer::new(&catalog, &availability);

        let result = analyzer.run(&["unknown_x", "RSI", "adx", "bbands", "rsi"], &frame(60));

        assert_eq!(result.computed, vec!["rsi", "bbands"]);
        let skipped: Vec<_> = result.skipped.iter().map(|s| (s.name.as_str(), s.reason)).collect();
        assert_eq!(
            skipped,
            vec![
                ("unknown_x", FailureReason::UnknownIndicator),
                ("adx", FailureReason::NoBackendAvailable),
            ]
        );
        let names: Vec<_> = result.column_names().collect();
        assert_eq!(names, vec!["RSI", "BBANDS_UPPER", "BBANDS_MIDDLE", "BBANDS_LOWER"]);
        assert_eq!(result.frame.len(), 60);
        assert_eq!(result.column("RSI").unwrap().len(), 60);
    }

    #[test]
    fn insufficient_rows_names_the_backend() {
        let catalog = Catalog::builtin().unwrap();
        let availability = native_only();
        let result = Analyzer::new(&catalog, &availability).run(&["rsi"], &frame(5));

        assert!(result.computed.is_empty());
        let skipped = result.skipped("rsi").unwrap();
        assert_eq!(skipped.reason, FailureReason::InsufficientInputRows);
        assert_eq!(skipped.backend, Some(Backend::Native));
    }

    #[test]
    fn parallel_and_sequential_runs_agree() {
        let catalog = Catalog::builtin().unwrap();
        let availability = native_only();
        let request = ["sma", "ema", "macd", "atr", "vwap", "ichimoku", "nope", "cdldoji"];
        let frame = frame(80);

        let sequential = Analyzer::new(&catalog, &availability).run(&request, &frame);
        let parallel = Analyzer::new(&catalog, &availability)
            .parallel(true)
            .run(&request, &frame);

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn parameter_overrides_apply() {
        let catalog = Catalog::builtin().unwrap();
        let availability = native_only();
        let analyzer = Analyzer::new(&catalog, &availability)
            .with_params("SMA", Params::new().with("length", 3.0));

        let result = analyzer.run(&["sma"], &frame(25));
        let sma = result.column("SMA").unwrap();
        assert!(sma[1].is_none());
        assert!(sma[2].is_some());
    }

    #[test]
    fn overridden_period_longer_than_the_frame_is_insufficient() {
        let catalog = Catalog::builtin().unwrap();
        let availability = native_only();
        let analyzer = Analyzer::new(&catalog, &availability)
            .with_params("sma", Params::new().with("length", 50.0))
            .with_params("ema", Params::new().with("length", 1e15));

        let result = analyzer.run(&["sma", "ema", "rsi"], &frame(25));
        assert_eq!(result.computed, vec!["rsi"]);
        for name in ["sma", "ema"] {
            let skipped = result.skipped(name).unwrap();
            assert_eq!(skipped.reason, FailureReason::InsufficientInputRows);
            assert_eq!(skipped.backend, Some(Backend::Native));
        }
        assert!(result.skipped("sma").unwrap().detail.contains("needs at least 50"));
    }

    #[test]
    fn invalid_override_is_a_backend_error() {
        let catalog = Catalog::builtin().unwrap();
        let availability = native_only();
        let analyzer = Analyzer::new(&catalog, &availability)
            .with_params("sma", Params::new().with("length", 2.5));

        let result = analyzer.run(&["sma"], &frame(25));
        assert_eq!(
            result.skipped("sma").unwrap().reason,
            FailureReason::BackendRaisedError
        );
    }

    #[test]
    fn empty_frame_is_rejected() {
        let catalog = Catalog::builtin().unwrap();
        let availability = native_only();
        let err = Analyzer::new(&catalog, &availability)
            .analyze(&["rsi"], &PriceFrame::default())
            .unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyFrame));
    }
}
