//! Computation backends and their process-wide availability.
//!
//! Backends are ranked; rank 0 wins. The order is part of the public contract
//! ("TA-Lib > ta > native") and never changes at runtime. Availability is
//! detected once at startup and is read-only afterwards; a restart is needed to
//! pick up a newly installed library.

use crate::dispatch::Params;
use crate::frame::PriceFrame;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{info, warn};

/// Computation providers in priority order (declaration order is rank order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Backend {
    /// TA-Lib through FFI.
    #[serde(rename = "talib")]
    TaLib,
    /// The `ta` crate.
    #[serde(rename = "ta")]
    Ta,
    /// Formulas implemented in this crate. Always available, always last.
    #[serde(rename = "native")]
    Native,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::TaLib, Backend::Ta, Backend::Native];

    pub fn rank(&self) -> usize {
        match self {
            Backend::TaLib => 0,
            Backend::Ta => 1,
            Backend::Native => 2,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Backend::TaLib => "talib",
            Backend::Ta => "ta",
            Backend::Native => "native",
        }
    }

    /// Cargo feature that compiles the backend in.
    pub fn feature(&self) -> Option<&'static str> {
        match self {
            Backend::TaLib => Some("talib"),
            Backend::Ta => Some("ta-crate"),
            Backend::Native => None,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "talib" | "ta-lib" => Ok(Backend::TaLib),
            "ta" => Ok(Backend::Ta),
            "native" | "manual" => Ok(Backend::Native),
            other => Err(format!("unknown backend `{}`", other)),
        }
    }
}

/// Native output shapes, before normalization into named columns.
#[derive(Debug, Clone, PartialEq)]
pub enum RawOutput {
    /// One series aligned to the frame; `NaN` where undefined.
    Series(Vec<f64>),
    /// Several series aligned to the frame, in the catalog's output order.
    Columns(Vec<Vec<f64>>),
    /// Series whose first value belongs to row `begin` (TA-Lib convention).
    Trailing { begin: usize, columns: Vec<Vec<f64>> },
    /// Candlestick scores aligned to the frame: +100 bullish, -100 bearish, 0 none.
    Signals(Vec<i32>),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    #[error("{backend} does not implement `{function}`")]
    UnknownFunction { backend: Backend, function: String },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("TA-Lib {function} failed with return code {code}")]
    ReturnCode { function: String, code: i32 },

    #[error("backend `{0}` is not compiled into this build")]
    NotCompiled(Backend),

    #[error("{0}")]
    Computation(String),
}

/// A provider of indicator formulas.
pub trait IndicatorBackend: Send + Sync {
    fn backend(&self) -> Backend;

    /// Capability check run once at startup. `Err` carries the reason.
    fn self_check(&self) -> Result<(), String>;

    /// Run the formula registered in the catalog under `function`.
    fn compute(
        &self,
        function: &str,
        frame: &PriceFrame,
        params: &Params,
    ) -> Result<RawOutput, BackendError>;
}

/// The compiled-in implementation of `backend`, if any.
pub fn implementation(backend: Backend) -> Option<&'static dyn IndicatorBackend> {
    match backend {
        Backend::TaLib => talib_implementation(),
        Backend::Ta => ta_implementation(),
        Backend::Native => Some(&crate::indicators::NativeBackend),
    }
}

#[cfg(feature = "talib")]
fn talib_implementation() -> Option<&'static dyn IndicatorBackend> {
    Some(&crate::talib_bindings::TaLibBackend)
}

#[cfg(not(feature = "talib"))]
fn talib_implementation() -> Option<&'static dyn IndicatorBackend> {
    None
}

#[cfg(feature = "ta-crate")]
fn ta_implementation() -> Option<&'static dyn IndicatorBackend> {
    Some(&crate::ta_adapter::TaCrateBackend)
}

#[cfg(not(feature = "ta-crate"))]
fn ta_implementation() -> Option<&'static dyn IndicatorBackend> {
    None
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendStatus {
    pub backend: Backend,
    pub rank: usize,
    pub available: bool,
    pub detail: String,
}

/// Ordered availability of every backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    statuses: Vec<BackendStatus>,
}

static AVAILABILITY: OnceLock<Availability> = OnceLock::new();

impl Availability {
    /// Check every backend. Never fails: an unusable backend is recorded as such.
    pub fn detect(disabled: &[Backend]) -> Self {
        let statuses = Backend::ALL
            .iter()
            .map(|&backend| {
                let (available, detail) = if backend != Backend::Native && disabled.contains(&backend) {
                    (false, "disabled by configuration".to_string())
                } else {
                    match implementation(backend) {
                        None => (
                            false,
                            format!(
                                "not compiled in (enable the `{}` feature)",
                                backend.feature().unwrap_or_default()
                            ),
                        ),
                        Some(imp) => match imp.self_check() {
                            Ok(()) => (true, "ok".to_string()),
                            Err(reason) => (false, reason),
                        },
                    }
                };
                BackendStatus {
                    backend,
                    rank: backend.rank(),
                    available,
                    detail,
                }
            })
            .collect();

        Self { statuses }
    }

    /// Availability from explicit flags. Backends not mentioned are unavailable.
    pub fn from_flags(flags: &[(Backend, bool)]) -> Self {
        let statuses = Backend::ALL
            .iter()
            .map(|&backend| {
                let available = flags
                    .iter()
                    .any(|&(b, available)| b == backend && available);
                BackendStatus {
                    backend,
                    rank: backend.rank(),
                    available,
                    detail: if available { "ok" } else { "unavailable" }.to_string(),
                }
            })
            .collect();

        Self { statuses }
    }

    /// Detect once for the whole process. Later calls return the first result.
    pub fn init(disabled: &[Backend]) -> &'static Availability {
        AVAILABILITY.get_or_init(|| {
            let availability = Self::detect(disabled);
            availability.log();
            availability
        })
    }

    /// Process-wide availability, probing with defaults if `init` was never called.
    pub fn global() -> &'static Availability {
        Self::init(&[])
    }

    pub fn statuses(&self) -> &[BackendStatus] {
        &self.statuses
    }

    pub fn is_available(&self, backend: Backend) -> bool {
        self.statuses
            .iter()
            .any(|s| s.backend == backend && s.available)
    }

    /// Available backends, highest priority first.
    pub fn available(&self) -> impl Iterator<Item = Backend> + '_ {
        self.statuses
            .iter()
            .filter(|s| s.available)
            .map(|s| s.backend)
    }

    fn log(&self) {
        for status in &self.statuses {
            if status.available {
                info!("Backend {} (rank {}) available", status.backend, status.rank);
            } else {
                warn!(
                    "Backend {} (rank {}) unavailable: {}",
                    status.backend, status.rank, status.detail
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_follows_declaration_order() {
        let mut sorted = vec![Backend::Native, Backend::TaLib, Backend::Ta];
        sorted.sort();
        assert_eq!(sorted, Backend::ALL.to_vec());
        for (i, backend) in Backend::ALL.iter().enumerate() {
            assert_eq!(backend.rank(), i);
        }
    }

    #[test]
    fn parses_backend_ids() {
        assert_eq!("TA-Lib".parse::<Backend>(), Ok(Backend::TaLib));
        assert_eq!(" ta ".parse::<Backend>(), Ok(Backend::Ta));
        assert_eq!("manual".parse::<Backend>(), Ok(Backend::Native));
        assert!("openbb".parse::<Backend>().is_err());
    }

    #[test]
    fn native_is_always_available() {
        let availability = Availability::detect(&[Backend::Native]);
        assert!(availability.is_available(Backend::Native));
        assert_eq!(availability.statuses().last().unwrap().backend, Backend::Native);
    }

    #[test]
    fn disabled_backends_are_reported() {
        let availability = Availability::detect(&[Backend::TaLib, Backend::Ta]);
        let statuses = availability.statuses();
        assert_eq!(statuses.len(), 3);
        assert!(!statuses[0].available);
        assert_eq!(statuses[0].detail, "disabled by configuration");
        assert!(!statuses[1].available);
        assert_eq!(availability.available().collect::<Vec<_>>(), vec![Backend::Native]);
    }

    #[cfg(not(feature = "talib"))]
    #[test]
    fn missing_feature_is_reported() {
        let availability = Availability::detect(&[]);
        let talib = &availability.statuses()[0];
        assert!(!talib.available);
        assert!(talib.detail.contains("`talib` feature"));
    }

    #[test]
    fn from_flags_keeps_priority_order() {
        let availability = Availability::from_flags(&[(Backend::Native, true), (Backend::TaLib, true)]);
        assert_eq!(
            availability.available().collect::<Vec<_>>(),
            vec![Backend::TaLib, Backend::Native]
        );
        assert!(!availability.is_available(Backend::Ta));
    }
}
