//! Runtime settings.
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file (`indicator-analysis.toml`, or the path in `INDICATOR_CONFIG`), then
//! `INDICATOR_*` environment variables.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::backend::Backend;

pub const DEFAULT_CONFIG_FILE: &str = "indicator-analysis.toml";
pub const CONFIG_PATH_VAR: &str = "INDICATOR_CONFIG";
const ENV_PREFIX: &str = "INDICATOR";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Root of the `<EXCHANGE>/<TICKER>.csv` price files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Second price directory tried when the first has no data.
    #[serde(default)]
    pub fallback_data_dir: Option<PathBuf>,

    #[serde(default = "default_exchange")]
    pub default_exchange: String,

    /// Window used when a request gives no start date.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    #[serde(default = "default_parallel")]
    pub parallel: bool,

    #[serde(default)]
    pub worker_threads: Option<usize>,

    /// Comma-separated backend ids, e.g. `talib,ta`.
    #[serde(default)]
    pub disabled_backends: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_exchange() -> String {
    "NSE".to_string()
}

fn default_lookback_days() -> u32 {
    90
}

fn default_parallel() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            fallback_data_dir: None,
            default_exchange: default_exchange(),
            lookback_days: default_lookback_days(),
            parallel: default_parallel(),
            worker_threads: None,
            disabled_backends: String::new(),
        }
    }
}

impl Settings {
    /// Load from the process environment.
    pub fn load() -> Result<Self, SettingsError> {
        let path = std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(Some(&path), None)
    }

    /// Load from an optional file and an explicit environment.
    ///
    /// `env` replaces the process environment when given.
    pub fn load_from(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();

        if let Some(path) = file {
            debug!("Reading settings from {} if present", path.display());
            builder = builder.add_source(File::from(path).required(false));
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).source(env));

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.lookback_days == 0 {
            return Err(SettingsError::Invalid {
                key: "lookback_days",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.worker_threads == Some(0) {
            return Err(SettingsError::Invalid {
                key: "worker_threads",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.default_exchange.trim().is_empty() {
            return Err(SettingsError::Invalid {
                key: "default_exchange",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Backends switched off by configuration. Unknown ids are logged and ignored.
    pub fn disabled_backends(&self) -> Vec<Backend> {
        let mut disabled = Vec::new();
        for id in self.disabled_backends.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match id.parse::<Backend>() {
                Ok(Backend::Native) => warn!("The native backend cannot be disabled, ignoring"),
                Ok(backend) if !disabled.contains(&backend) => disabled.push(backend),
                Ok(_) => {}
                Err(err) => warn!("Ignoring disabled backend entry: {}", err),
            }
        }
        disabled
    }

    pub fn worker_threads(&self) -> usize {
        self.worker_threads.unwrap_or_else(num_cpus::get)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn defaults_apply_without_sources() {
        let settings = Settings::load_from(None, env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.lookback_days, 90);
        assert_eq!(settings.default_exchange, "NSE");
        assert!(settings.parallel);
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = Settings::load_from(
            None,
            env(&[
                ("INDICATOR_DATA_DIR", "/srv/prices"),
                ("INDICATOR_LOOKBACK_DAYS", "30"),
                ("INDICATOR_PARALLEL", "false"),
                ("INDICATOR_DISABLED_BACKENDS", "talib"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.data_dir, PathBuf::from("/srv/prices"));
        assert_eq!(settings.lookback_days, 30);
        assert!(!settings.parallel);
        assert_eq!(settings.disabled_backends(), vec![Backend::TaLib]);
    }

    #[test]
    fn file_is_read_and_environment_wins() {
        let path = std::env::temp_dir().join(format!("settings-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "default_exchange = \"BSE\"\nlookback_days = 45\n").unwrap();

        let settings =
            Settings::load_from(Some(&path), env(&[("INDICATOR_LOOKBACK_DAYS", "10")])).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(settings.default_exchange, "BSE");
        assert_eq!(settings.lookback_days, 10);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let path = Path::new("/nonexistent/indicator-analysis.toml");
        assert!(Settings::load_from(Some(path), env(&[])).is_ok());
    }

    #[test]
    fn rejects_zero_lookback() {
        let err = Settings::load_from(None, env(&[("INDICATOR_LOOKBACK_DAYS", "0")])).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { key: "lookback_days", .. }));
    }

    #[test]
    fn unknown_and_native_backend_ids_are_ignored() {
        let settings = Settings {
            disabled_backends: "ta, bogus, native, ta-lib, ta".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.disabled_backends(), vec![Backend::Ta, Backend::TaLib]);
    }

    #[test]
    fn worker_threads_fall_back_to_cpu_count() {
        assert_eq!(Settings::default().worker_threads(), num_cpus::get());
        let settings = Settings {
            worker_threads: Some(3),
            ..Settings::default()
        };
        assert_eq!(settings.worker_threads(), 3);
    }
}
