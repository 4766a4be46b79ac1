//! Indicator catalog: the source of truth for "is this indicator known at all".
//!
//! Each entry declares its inputs, default parameters, minimum window, the
//! names of its output columns and, per backend, the function that computes
//! it. The catalog is validated once and never changes afterwards.

mod entries;

use crate::backend::{Backend, BackendError};
use crate::dispatch::Params;
use crate::error::CatalogError;
use crate::frame::Column;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::OnceLock;

/// Computed when a request names no indicators.
pub const DEFAULT_INDICATORS: &[&str] = &[
    "sma", "ema", "rsi", "bbands", "macd", "atr", "vwap", "ichimoku",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Overlap,
    Momentum,
    Volatility,
    Volume,
    Pattern,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Overlap => write!(f, "overlap"),
            Category::Momentum => write!(f, "momentum"),
            Category::Volatility => write!(f, "volatility"),
            Category::Volume => write!(f, "volume"),
            Category::Pattern => write!(f, "pattern"),
        }
    }
}

/// Usable rows an indicator needs before every output column has a value.
#[derive(Clone, Copy)]
pub enum Window {
    Fixed(usize),
    /// Derived from the parameters of the call, so overrides move it too.
    FromParams(fn(&Params) -> Result<usize, BackendError>),
}

impl Window {
    pub fn rows(&self, params: &Params) -> Result<usize, BackendError> {
        match self {
            Window::Fixed(rows) => Ok(*rows),
            Window::FromParams(rows) => rows(params),
        }
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Window::Fixed(rows) => write!(f, "Fixed({})", rows),
            Window::FromParams(_) => f.write_str("FromParams"),
        }
    }
}

/// A backend able to compute an indicator, and the function it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Support {
    pub backend: Backend,
    pub function: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndicatorSpec {
    /// Canonical lowercase key.
    pub name: &'static str,
    pub label: &'static str,
    pub category: Category,
    pub inputs: &'static [Column],
    pub params: Vec<(&'static str, f64)>,
    /// Usable rows needed with the default parameters.
    pub min_bars: usize,
    #[serde(skip)]
    pub window: Window,
    /// Output suffixes. Empty means a single column named after the indicator.
    pub outputs: &'static [&'static str],
    /// Capable backends, highest priority first after validation.
    pub support: Vec<Support>,
}

impl IndicatorSpec {
    pub fn new(name: &'static str, label: &'static str, category: Category) -> Self {
        Self {
            name,
            label,
            category,
            inputs: &[Column::Close],
            params: Vec::new(),
            min_bars: 1,
            window: Window::Fixed(1),
            outputs: &[],
            support: Vec::new(),
        }
    }

    pub fn inputs(mut self, inputs: &'static [Column]) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn param(mut self, name: &'static str, value: f64) -> Self {
        self.params.push((name, value));
        self
    }

    /// A window that does not depend on parameters.
    pub fn min_bars(mut self, min_bars: usize) -> Self {
        self.min_bars = min_bars;
        self.window = Window::Fixed(min_bars);
        self
    }

    /// A window computed from the parameters in use. `min_bars` is filled in
    /// from the defaults when the catalog is built.
    pub fn window(mut self, rows: fn(&Params) -> Result<usize, BackendError>) -> Self {
        self.window = Window::FromParams(rows);
        self
    }

    /// Usable rows needed to compute with `params`.
    pub fn required_rows(&self, params: &Params) -> Result<usize, BackendError> {
        self.window.rows(params)
    }

    pub fn outputs(mut self, outputs: &'static [&'static str]) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn supported_by(mut self, backend: Backend, function: &'static str) -> Self {
        self.support.push(Support { backend, function });
        self
    }

    pub fn talib(self, function: &'static str) -> Self {
        self.supported_by(Backend::TaLib, function)
    }

    pub fn ta(self, function: &'static str) -> Self {
        self.supported_by(Backend::Ta, function)
    }

    pub fn native(self, function: &'static str) -> Self {
        self.supported_by(Backend::Native, function)
    }

    /// Function registered for `backend`, if that backend can compute this indicator.
    pub fn function_for(&self, backend: Backend) -> Option<&'static str> {
        self.support
            .iter()
            .find(|s| s.backend == backend)
            .map(|s| s.function)
    }

    pub fn backends(&self) -> Vec<Backend> {
        self.support.iter().map(|s| s.backend).collect()
    }

    /// Output column names: `NAME` or `NAME_SUFFIX`, uppercase.
    pub fn column_names(&self) -> Vec<String> {
        let base = self.name.to_uppercase();
        if self.outputs.is_empty() {
            vec![base]
        } else {
            self.outputs
                .iter()
                .map(|suffix| format!("{}_{}", base, suffix.to_uppercase()))
                .collect()
        }
    }

    pub fn default_params(&self) -> Params {
        Params::from_pairs(&self.params)
    }
}

/// Trimmed, lowercase form used for lookups and result lists.
pub fn canonical_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone)]
pub struct Catalog {
    specs: Vec<IndicatorSpec>,
    index: HashMap<&'static str, usize>,
}

static CATALOG: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    /// Validate and index `specs`. Any definition error is fatal.
    pub fn from_specs(mut specs: Vec<IndicatorSpec>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(specs.len());

        for spec in &mut specs {
            if canonical_name(spec.name) != spec.name || spec.name.is_empty() {
                return Err(CatalogError::NonCanonicalName(spec.name.to_string()));
            }
            spec.min_bars = spec
                .required_rows(&spec.default_params())
                .map_err(|err| CatalogError::InvalidWindow {
                    name: spec.name.to_string(),
                    reason: err.to_string(),
                })?;
            if spec.min_bars == 0 {
                return Err(CatalogError::ZeroMinBars(spec.name.to_string()));
            }

            let mut seen = HashSet::new();
            for support in &spec.support {
                if !seen.insert(support.backend) {
                    return Err(CatalogError::DuplicateBackend {
                        name: spec.name.to_string(),
                        backend: support.backend.to_string(),
                    });
                }
            }
            spec.support.sort_by_key(|s| s.backend.rank());

            let mut suffixes = HashSet::new();
            for suffix in spec.outputs {
                if !suffixes.insert(suffix.to_uppercase()) {
                    return Err(CatalogError::DuplicateOutput {
                        name: spec.name.to_string(),
                        suffix: suffix.to_string(),
                    });
                }
            }
        }

        specs.sort_by(|a, b| a.name.cmp(b.name));
        for (i, spec) in specs.iter().enumerate() {
            if index.insert(spec.name, i).is_some() {
                return Err(CatalogError::DuplicateName(spec.name.to_string()));
            }
        }

        Ok(Self { specs, index })
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_specs(entries::builtin())
    }

    /// Process-wide built-in catalog, validated on first use.
    pub fn global() -> Result<&'static Catalog, CatalogError> {
        if let Some(catalog) = CATALOG.get() {
            return Ok(catalog);
        }
        let catalog = Self::builtin()?;
        Ok(CATALOG.get_or_init(|| catalog))
    }

    /// Case-insensitive, trimmed lookup.
    pub fn lookup(&self, name: &str) -> Option<&IndicatorSpec> {
        let key = canonical_name(name);
        self.index.get(key.as_str()).map(|&i| &self.specs[i])
    }

    /// Every entry, sorted by name.
    pub fn list_all(&self) -> &[IndicatorSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.len() > 100);
        for name in DEFAULT_INDICATORS {
            assert!(catalog.lookup(name).is_some(), "missing default {}", name);
        }
    }

    #[test]
    fn every_builtin_entry_has_a_backend() {
        let catalog = Catalog::builtin().unwrap();
        for spec in catalog.list_all() {
            assert!(!spec.support.is_empty(), "{} has no backend", spec.name);
        }
    }

    #[test]
    fn lookup_is_case_insensitive_and_trimmed() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.lookup("  RSI ").map(|s| s.name), Some("rsi"));
        assert!(catalog.lookup("not_an_indicator").is_none());
    }

    #[test]
    fn list_all_is_sorted() {
        let catalog = Catalog::builtin().unwrap();
        let names: Vec<_> = catalog.list_all().iter().map(|s| s.name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let specs = vec![
            IndicatorSpec::new("rsi", "RSI", Category::Momentum).native("rsi"),
            IndicatorSpec::new("rsi", "RSI again", Category::Momentum).native("rsi"),
        ];
        assert_eq!(
            Catalog::from_specs(specs).unwrap_err(),
            CatalogError::DuplicateName("rsi".to_string())
        );
    }

    #[test]
    fn non_canonical_names_are_rejected() {
        let specs = vec![IndicatorSpec::new("RSI", "RSI", Category::Momentum)];
        assert!(matches!(
            Catalog::from_specs(specs),
            Err(CatalogError::NonCanonicalName(_))
        ));
    }

    #[test]
    fn duplicate_backends_are_rejected() {
        let specs = vec![IndicatorSpec::new("sma", "SMA", Category::Overlap)
            .native("sma")
            .native("sma2")];
        assert!(matches!(
            Catalog::from_specs(specs),
            Err(CatalogError::DuplicateBackend { .. })
        ));
    }

    #[test]
    fn support_is_sorted_by_priority() {
        let specs = vec![IndicatorSpec::new("sma", "SMA", Category::Overlap)
            .native("sma")
            .talib("SMA")
            .ta("sma")];
        let catalog = Catalog::from_specs(specs).unwrap();
        assert_eq!(
            catalog.lookup("sma").unwrap().backends(),
            vec![Backend::TaLib, Backend::Ta, Backend::Native]
        );
    }

    #[test]
    fn min_bars_follow_the_default_parameters() {
        let catalog = Catalog::builtin().unwrap();
        let min_bars = |name: &str| catalog.lookup(name).unwrap().min_bars;
        assert_eq!(min_bars("sma"), 20);
        assert_eq!(min_bars("rsi"), 15);
        assert_eq!(min_bars("mfi"), 15);
        assert_eq!(min_bars("macd"), 34);
        assert_eq!(min_bars("ichimoku"), 78);
        assert_eq!(min_bars("adx"), 28);
        assert_eq!(min_bars("adxr"), 41);
        assert_eq!(min_bars("trix"), 89);
        assert_eq!(min_bars("t3"), 25);
        assert_eq!(min_bars("stoch"), 18);
        assert_eq!(min_bars("stochrsi"), 21);
        assert_eq!(min_bars("ultosc"), 29);
        assert_eq!(min_bars("cdlmorningstar"), 3);
        assert_eq!(min_bars("cdlbreakaway"), 5);
    }

    #[test]
    fn huge_periods_saturate_instead_of_wrapping() {
        let catalog = Catalog::builtin().unwrap();
        let sma = catalog.lookup("sma").unwrap();
        assert_eq!(
            sma.required_rows(&sma.default_params().with("length", 1e15)),
            Ok(1_000_000_000_000_000)
        );

        let tema = catalog.lookup("tema").unwrap();
        assert_eq!(
            tema.required_rows(&tema.default_params().with("length", 1e300)),
            Ok(usize::MAX)
        );
    }

    #[test]
    fn catalog_covers_the_wider_talib_set() {
        let catalog = Catalog::builtin().unwrap();
        for name in [
            "trima", "kama", "t3", "cmo", "apo", "ppo", "trix", "adxr", "plus_di", "minus_di",
            "willr", "typprice", "wclprice", "avgprice", "medprice", "bop", "cdlmathold",
            "cdl3linestrike", "cdlabandonedbaby",
        ] {
            let spec = catalog.lookup(name).unwrap_or_else(|| panic!("missing {}", name));
            assert!(spec.function_for(Backend::TaLib).is_some(), "{} lacks TA-Lib", name);
        }
        assert!(catalog.lookup("cdlpiercing").unwrap().params.is_empty());
    }

    #[test]
    fn window_moves_with_overrides() {
        let catalog = Catalog::builtin().unwrap();
        let sma = catalog.lookup("sma").unwrap();
        assert_eq!(sma.required_rows(&sma.default_params().with("length", 50.0)), Ok(50));

        let macd = catalog.lookup("macd").unwrap();
        let params = macd.default_params().with("signal", 20.0);
        assert_eq!(macd.required_rows(&params), Ok(26 + 20 - 1));
        assert!(macd.required_rows(&params.with("slow", 0.5)).is_err());
    }

    #[test]
    fn window_without_valid_defaults_is_rejected() {
        let specs = vec![IndicatorSpec::new("sma", "SMA", Category::Overlap)
            .window(|p| p.period("length"))
            .native("sma")];
        assert!(matches!(
            Catalog::from_specs(specs),
            Err(CatalogError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn zero_window_is_rejected() {
        let specs = vec![IndicatorSpec::new("vwap", "VWAP", Category::Overlap)
            .min_bars(0)
            .native("vwap")];
        assert_eq!(
            Catalog::from_specs(specs).unwrap_err(),
            CatalogError::ZeroMinBars("vwap".to_string())
        );
    }

    #[test]
    fn column_names_follow_the_naming_contract() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.lookup("rsi").unwrap().column_names(), vec!["RSI"]);
        assert_eq!(
            catalog.lookup("bbands").unwrap().column_names(),
            vec!["BBANDS_UPPER", "BBANDS_MIDDLE", "BBANDS_LOWER"]
        );
        assert_eq!(
            catalog.lookup("macd").unwrap().column_names(),
            vec!["MACD_MACD", "MACD_SIGNAL", "MACD_HIST"]
        );
    }
}
