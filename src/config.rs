use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nimbus_calendar::YearMonth;
use serde::Deserialize;

/// Top-level nimbus configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NimbusConfig {
    /// Input data settings.
    #[serde(default)]
    pub data: DataToml,

    /// Train/test split settings.
    #[serde(default)]
    pub split: SplitToml,

    /// ADF test settings.
    #[serde(default)]
    pub stationarity: StationarityToml,

    /// ARIMA model settings.
    #[serde(default)]
    pub model: ModelToml,

    /// Output settings.
    #[serde(default)]
    pub output: OutputToml,
}

impl NimbusConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DataToml {
    pub path: Option<PathBuf>,
    pub city: Option<String>,
    /// First month kept, inclusive (`YYYY-MM`).
    pub start: Option<YearMonth>,
    /// Last month kept, inclusive (`YYYY-MM`).
    pub end: Option<YearMonth>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitToml {
    #[serde(default = "default_train_fraction")]
    pub train_fraction: f64,
}

impl Default for SplitToml {
    fn default() -> Self {
        Self {
            train_fraction: default_train_fraction(),
        }
    }
}

fn default_train_fraction() -> f64 {
    0.9
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StationarityToml {
    #[serde(default = "default_regression")]
    pub regression: String,
    #[serde(default = "default_autolag")]
    pub autolag: String,
    #[serde(default)]
    pub max_lags: Option<usize>,
    #[serde(default = "default_min_obs")]
    pub min_obs: usize,
}

impl Default for StationarityToml {
    fn default() -> Self {
        Self {
            regression: default_regression(),
            autolag: default_autolag(),
            max_lags: None,
            min_obs: default_min_obs(),
        }
    }
}

fn default_regression() -> String {
    "c".to_string()
}
fn default_autolag() -> String {
    "aic".to_string()
}
fn default_min_obs() -> usize {
    nimbus_stationarity::AdfConfig::DEFAULT_MIN_OBS
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    /// `[p, d, q]`.
    #[serde(default = "default_order")]
    pub order: [usize; 3],
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
    #[serde(default = "default_interval")]
    pub interval: String,
    #[serde(default)]
    pub strict_convergence: bool,
    /// Omitted means the limit scales with the number of parameters.
    #[serde(default)]
    pub max_iters: Option<u64>,
}

impl Default for ModelToml {
    fn default() -> Self {
        Self {
            order: default_order(),
            confidence_level: default_confidence_level(),
            interval: default_interval(),
            strict_convergence: false,
            max_iters: None,
        }
    }
}

fn default_order() -> [usize; 3] {
    [1, 1, 1]
}
fn default_confidence_level() -> f64 {
    0.95
}
fn default_interval() -> String {
    "exact".to_string()
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    /// CSV results table; omitted means results are not persisted.
    pub results: Option<PathBuf>,
    /// JSON plot-data file.
    pub plot: Option<PathBuf>,
}
