//! Computation dispatcher: runs one resolved indicator and normalizes its output.

use crate::backend::{self, Backend, BackendError, IndicatorBackend, RawOutput};
use crate::catalog::IndicatorSpec;
use crate::frame::PriceFrame;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// One output column aligned to the frame. `None` where undefined.
pub type Series = Vec<Option<f64>>;

/// Named indicator parameters, seeded from the catalog defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Params {
    values: BTreeMap<String, f64>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self {
            values: pairs
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
        }
    }

    /// Override (or add) a parameter.
    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn float(&self, name: &str) -> Result<f64, BackendError> {
        match self.get(name) {
            Some(v) if v.is_finite() => Ok(v),
            Some(v) => Err(invalid(name, format!("{} is not a finite number", v))),
            None => Err(invalid(name, "missing".to_string())),
        }
    }

    /// A window length: a positive whole number.
    pub fn period(&self, name: &str) -> Result<usize, BackendError> {
        let value = self.float(name)?;
        if value < 1.0 {
            return Err(invalid(name, format!("period must be positive, got {}", value)));
        }
        if value.fract() != 0.0 {
            return Err(invalid(name, format!("period must be a whole number, got {}", value)));
        }
        Ok(value as usize)
    }
}

fn invalid(name: &str, reason: String) -> BackendError {
    BackendError::InvalidParameter {
        name: name.to_string(),
        reason,
    }
}

/// Why a requested indicator produced no output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    UnknownIndicator,
    NoBackendAvailable,
    BackendRaisedError,
    InsufficientInputRows,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::UnknownIndicator => "unknown_indicator",
            FailureReason::NoBackendAvailable => "no_backend_available",
            FailureReason::BackendRaisedError => "backend_raised_error",
            FailureReason::InsufficientInputRows => "insufficient_input_rows",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub reason: FailureReason,
    pub detail: String,
}

impl Failure {
    pub fn new(reason: FailureReason, detail: impl Into<String>) -> Self {
        Self {
            reason,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason, self.detail)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComputationOutcome {
    Success {
        columns: Vec<(String, Series)>,
        backend: Backend,
    },
    Failure(Failure),
}

impl ComputationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ComputationOutcome::Success { .. })
    }
}

/// Compute `spec` on `frame` with the compiled-in implementation of `backend`.
pub fn compute(
    backend: Backend,
    spec: &IndicatorSpec,
    frame: &PriceFrame,
    params: &Params,
) -> ComputationOutcome {
    match backend::implementation(backend) {
        Some(implementation) => compute_with(implementation, spec, frame, params),
        None => {
            let err = BackendError::NotCompiled(backend);
            warn!("{} on {}: {}", spec.name, backend, err);
            ComputationOutcome::Failure(Failure::new(
                FailureReason::BackendRaisedError,
                err.to_string(),
            ))
        }
    }
}

/// Compute `spec` with an explicit backend implementation.
pub fn compute_with(
    implementation: &dyn IndicatorBackend,
    spec: &IndicatorSpec,
    frame: &PriceFrame,
    params: &Params,
) -> ComputationOutcome {
    let backend = implementation.backend();

    // The window comes from the parameters in use, so an oversized period is
    // refused here before any backend allocates for it.
    let required = match spec.required_rows(params) {
        Ok(required) => required,
        Err(err) => {
            warn!("{} on {}: {}", spec.name, backend, err);
            return ComputationOutcome::Failure(Failure::new(
                FailureReason::BackendRaisedError,
                err.to_string(),
            ));
        }
    };

    let usable = frame.usable_rows(spec.inputs);
    if usable < required {
        let inputs: Vec<&str> = spec.inputs.iter().map(|c| c.as_str()).collect();
        return ComputationOutcome::Failure(Failure::new(
            FailureReason::InsufficientInputRows,
            format!(
                "{} needs at least {} rows with {} present, got {}",
                spec.name,
                required,
                inputs.join("/"),
                usable
            ),
        ));
    }

    let function = match spec.function_for(backend) {
        Some(function) => function,
        None => {
            return ComputationOutcome::Failure(Failure::new(
                FailureReason::BackendRaisedError,
                format!("{} is not registered for backend {}", spec.name, backend),
            ))
        }
    };

    debug!("Computing {} with {}::{}", spec.name, backend, function);

    let result = implementation
        .compute(function, frame, params)
        .and_then(|raw| normalize(spec, frame.len(), raw));

    match result {
        Ok(columns) => ComputationOutcome::Success { columns, backend },
        Err(err) => {
            warn!("{} failed on {}: {}", spec.name, backend, err);
            ComputationOutcome::Failure(Failure::new(
                FailureReason::BackendRaisedError,
                err.to_string(),
            ))
        }
    }
}

/// Map raw backend output onto the column names the catalog declares.
pub fn normalize(
    spec: &IndicatorSpec,
    rows: usize,
    raw: RawOutput,
) -> Result<Vec<(String, Series)>, BackendError> {
    let names = spec.column_names();

    let columns: Vec<Vec<f64>> = match raw {
        RawOutput::Series(series) => vec![series],
        RawOutput::Columns(columns) => columns,
        RawOutput::Trailing { begin, columns } => columns
            .into_iter()
            .map(|column| align_trailing(begin, column, rows))
            .collect::<Result<_, _>>()?,
        RawOutput::Signals(signals) => vec![signals.into_iter().map(f64::from).collect()],
    };

    if columns.len() != names.len() {
        return Err(BackendError::Computation(format!(
            "{} produced {} columns, expected {}",
            spec.name,
            columns.len(),
            names.len()
        )));
    }

    names
        .into_iter()
        .zip(columns)
        .map(|(name, column)| {
            if column.len() != rows {
                return Err(BackendError::Computation(format!(
                    "{} produced {} values, expected {}",
                    name,
                    column.len(),
                    rows
                )));
            }
            let series = column
                .into_iter()
                .map(|v| if v.is_finite() { Some(v) } else { None })
                .collect();
            Ok((name, series))
        })
        .collect()
}

// Values start at row `begin`; everything before and after is undefined
fn align_trailing(begin: usize, column: Vec<f64>, rows: usize) -> Result<Vec<f64>, BackendError> {
    if begin + column.len() > rows {
        return Err(BackendError::Computation(format!(
            "output of {} values starting at row {} overruns {} rows",
            column.len(),
            begin,
            rows
        )));
    }
    let mut aligned = vec![f64::NAN; begin];
    aligned.extend(column);
    aligned.resize(rows, f64::NAN);
    Ok(aligned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, IndicatorSpec};
    use crate::frame::{Bar, Column};
    use chrono::{DateTime, Duration, Utc};

    struct Fixed(RawOutput);

    impl IndicatorBackend for Fixed {
        fn backend(&self) -> Backend {
            Backend::Native
        }

        fn self_check(&self) -> Result<(), String> {
            Ok(())
        }

        fn compute(&self, _: &str, _: &PriceFrame, _: &Params) -> Result<RawOutput, BackendError> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl IndicatorBackend for Failing {
        fn backend(&self) -> Backend {
            Backend::Native
        }

        fn self_check(&self) -> Result<(), String> {
            Ok(())
        }

        fn compute(&self, _: &str, _: &PriceFrame, _: &Params) -> Result<RawOutput, BackendError> {
            Err(BackendError::Computation("division by zero".to_string()))
        }
    }

    fn frame(rows: usize) -> PriceFrame {
        let start = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        PriceFrame::from_bars((0..rows).map(|i| {
            let p = 100.0 + i as f64;
            Bar::new(start + Duration::days(i as i64), p, p + 1.0, p - 1.0, p, 1000.0)
        }))
        .unwrap()
    }

    fn single() -> IndicatorSpec {
        IndicatorSpec::new("rsi", "RSI", Category::Momentum)
            .min_bars(3)
            .native("rsi")
    }

    fn triple() -> IndicatorSpec {
        IndicatorSpec::new("bbands", "Bollinger Bands", Category::Overlap)
            .min_bars(2)
            .outputs(&["upper", "middle", "lower"])
            .native("bbands")
    }

    #[test]
    fn period_validation() {
        let params = Params::new()
            .with("ok", 14.0)
            .with("zero", 0.0)
            .with("negative", -3.0)
            .with("fraction", 2.5);
        assert_eq!(params.period("ok"), Ok(14));
        assert!(params.period("zero").is_err());
        assert!(params.period("negative").is_err());
        assert!(params.period("fraction").is_err());
        assert!(params.period("missing").is_err());
    }

    #[test]
    fn single_series_is_named_after_the_indicator() {
        let backend = Fixed(RawOutput::Series(vec![f64::NAN, 1.0, 2.0, 3.0]));
        let outcome = compute_with(&backend, &single(), &frame(4), &Params::new());
        assert_eq!(
            outcome,
            ComputationOutcome::Success {
                columns: vec![("RSI".to_string(), vec![None, Some(1.0), Some(2.0), Some(3.0)])],
                backend: Backend::Native,
            }
        );
    }

    #[test]
    fn trailing_output_is_aligned_to_the_frame() {
        let backend = Fixed(RawOutput::Trailing {
            begin: 2,
            columns: vec![vec![3.0, 4.0], vec![2.0, 3.0], vec![1.0, 2.0]],
        });
        let outcome = compute_with(&backend, &triple(), &frame(4), &Params::new());
        match outcome {
            ComputationOutcome::Success { columns, .. } => {
                let names: Vec<_> = columns.iter().map(|(n, _)| n.as_str()).collect();
                assert_eq!(names, vec!["BBANDS_UPPER", "BBANDS_MIDDLE", "BBANDS_LOWER"]);
                assert_eq!(columns[0].1, vec![None, None, Some(3.0), Some(4.0)]);
                assert_eq!(columns[2].1, vec![None, None, Some(1.0), Some(2.0)]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn signals_become_numbers() {
        let backend = Fixed(RawOutput::Signals(vec![0, 100, -100]));
        let outcome = compute_with(&backend, &single(), &frame(3), &Params::new());
        match outcome {
            ComputationOutcome::Success { columns, .. } => {
                assert_eq!(columns[0].1, vec![Some(0.0), Some(100.0), Some(-100.0)]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn non_finite_values_become_missing() {
        let backend = Fixed(RawOutput::Series(vec![f64::INFINITY, f64::NEG_INFINITY, 1.0]));
        let outcome = compute_with(&backend, &single(), &frame(3), &Params::new());
        match outcome {
            ComputationOutcome::Success { columns, .. } => {
                assert_eq!(columns[0].1, vec![None, None, Some(1.0)]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn column_count_mismatch_is_a_backend_error() {
        let backend = Fixed(RawOutput::Columns(vec![vec![1.0; 4], vec![1.0; 4]]));
        match compute_with(&backend, &triple(), &frame(4), &Params::new()) {
            ComputationOutcome::Failure(failure) => {
                assert_eq!(failure.reason, FailureReason::BackendRaisedError);
                assert!(failure.detail.contains("2 columns, expected 3"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn length_mismatch_is_a_backend_error() {
        let backend = Fixed(RawOutput::Series(vec![1.0; 3]));
        let outcome = compute_with(&backend, &single(), &frame(4), &Params::new());
        assert!(matches!(
            outcome,
            ComputationOutcome::Failure(Failure { reason: FailureReason::BackendRaisedError, .. })
        ));
    }

    #[test]
    fn overrunning_trailing_output_is_a_backend_error() {
        let backend = Fixed(RawOutput::Trailing {
            begin: 3,
            columns: vec![vec![1.0, 2.0]],
        });
        let outcome = compute_with(&backend, &single(), &frame(4), &Params::new());
        assert!(!outcome.is_success());
    }

    #[test]
    fn backend_errors_are_captured() {
        match compute_with(&Failing, &single(), &frame(5), &Params::new()) {
            ComputationOutcome::Failure(failure) => {
                assert_eq!(failure.reason, FailureReason::BackendRaisedError);
                assert_eq!(failure.detail, "division by zero");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn short_frames_never_reach_the_backend() {
        match compute_with(&Failing, &single(), &frame(2), &Params::new()) {
            ComputationOutcome::Failure(failure) => {
                assert_eq!(failure.reason, FailureReason::InsufficientInputRows);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    fn windowed() -> IndicatorSpec {
        IndicatorSpec::new("sma", "SMA", Category::Overlap)
            .param("length", 3.0)
            .window(|p| p.period("length"))
            .native("sma")
    }

    #[test]
    fn overridden_period_sets_the_required_rows() {
        let spec = windowed();
        let params = spec.default_params().with("length", 10.0);
        match compute_with(&Failing, &spec, &frame(5), &params) {
            ComputationOutcome::Failure(failure) => {
                assert_eq!(failure.reason, FailureReason::InsufficientInputRows);
                assert!(failure.detail.contains("needs at least 10"), "{}", failure.detail);
            }
            other => panic!("unexpected {:?}", other),
        }

        let backend = Fixed(RawOutput::Series(vec![1.0; 5]));
        assert!(compute_with(&backend, &spec, &frame(5), &spec.default_params()).is_success());
    }

    #[test]
    fn huge_period_is_refused_before_the_backend_runs() {
        let spec = windowed();
        let params = spec.default_params().with("length", 1e15);
        match compute_with(&Failing, &spec, &frame(5), &params) {
            ComputationOutcome::Failure(failure) => {
                assert_eq!(failure.reason, FailureReason::InsufficientInputRows);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn invalid_window_parameter_is_a_backend_error() {
        let spec = windowed();
        let params = spec.default_params().with("length", 0.0);
        match compute_with(&Failing, &spec, &frame(5), &params) {
            ComputationOutcome::Failure(failure) => {
                assert_eq!(failure.reason, FailureReason::BackendRaisedError);
                assert!(failure.detail.contains("length"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn missing_inputs_do_not_count_as_usable_rows() {
        let start = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let bars = (0..5).map(|i| {
            let mut bar = Bar::new(start + Duration::days(i), 1.0, 1.0, 1.0, 1.0, 1.0);
            if i % 2 == 0 {
                bar.volume = None;
            }
            bar
        });
        let frame = PriceFrame::from_bars(bars).unwrap();
        let spec = IndicatorSpec::new("obv", "OBV", Category::Volume)
            .inputs(&[Column::Close, Column::Volume])
            .min_bars(3)
            .native("obv");
        let backend = Fixed(RawOutput::Series(vec![0.0; 5]));
        match compute_with(&backend, &spec, &frame, &Params::new()) {
            ComputationOutcome::Failure(failure) => {
                assert_eq!(failure.reason, FailureReason::InsufficientInputRows);
                assert!(failure.detail.contains("got 2"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unregistered_backend_is_a_backend_error() {
        let spec = IndicatorSpec::new("adx", "ADX", Category::Momentum).talib("ADX");
        let backend = Fixed(RawOutput::Series(vec![0.0; 3]));
        let outcome = compute_with(&backend, &spec, &frame(3), &Params::new());
        assert!(matches!(
            outcome,
            ComputationOutcome::Failure(Failure { reason: FailureReason::BackendRaisedError, .. })
        ));
    }
}
