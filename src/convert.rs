//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use nimbus_arima::{ArimaOrder, IntervalMethod};
use nimbus_io::ReaderConfig;
use nimbus_pipeline::PipelineConfig;
use nimbus_stationarity::{AdfConfig, Autolag, Regression};

use crate::config::{DataToml, ModelToml, StationarityToml};

/// Parses an ADF regression code (`n`, `c`, `ct`).
pub fn parse_regression(s: &str) -> Result<Regression> {
    match s.to_lowercase().as_str() {
        "n" | "none" => Ok(Regression::None),
        "c" | "constant" => Ok(Regression::Constant),
        "ct" | "trend" => Ok(Regression::ConstantTrend),
        other => bail!("unknown ADF regression: {other:?}"),
    }
}

/// Parses an ADF lag selection name.
pub fn parse_autolag(s: &str) -> Result<Autolag> {
    match s.to_lowercase().as_str() {
        "aic" => Ok(Autolag::Aic),
        "fixed" | "none" => Ok(Autolag::Fixed),
        other => bail!("unknown autolag method: {other:?}"),
    }
}

/// Parses a forecast interval method name.
pub fn parse_interval(s: &str) -> Result<IntervalMethod> {
    match s.to_lowercase().as_str() {
        "exact" => Ok(IntervalMethod::Exact),
        "independent" | "independent_increments" => Ok(IntervalMethod::IndependentIncrements),
        other => bail!("unknown interval method: {other:?}"),
    }
}

/// Builds an [`AdfConfig`] from the TOML stationarity configuration.
pub fn build_adf_config(st: &StationarityToml) -> Result<AdfConfig> {
    let mut cfg = AdfConfig::new()
        .with_regression(parse_regression(&st.regression)?)
        .with_autolag(parse_autolag(&st.autolag)?)
        .with_min_obs(st.min_obs);
    if let Some(max_lags) = st.max_lags {
        cfg = cfg.with_max_lags(max_lags);
    }
    Ok(cfg)
}

/// Builds a [`PipelineConfig`] from the TOML model and stationarity sections.
pub fn build_pipeline_config(model: &ModelToml, st: &StationarityToml) -> Result<PipelineConfig> {
    let level = model.confidence_level;
    if !(level > 0.0 && level < 1.0) {
        bail!("confidence_level must be in (0, 1), got {level}");
    }
    if model.max_iters == Some(0) {
        bail!("max_iters must be greater than 0");
    }
    let [p, d, q] = model.order;
    let mut cfg = PipelineConfig::new(ArimaOrder::new(p, d, q))
        .with_confidence_level(level)
        .with_adf(build_adf_config(st)?)
        .with_interval(parse_interval(&model.interval)?)
        .with_strict_convergence(model.strict_convergence);
    if let Some(max_iters) = model.max_iters {
        cfg = cfg.with_max_iters(max_iters);
    }
    Ok(cfg)
}

/// Builds a [`ReaderConfig`] for `city` from the TOML data section.
pub fn build_reader_config(data: &DataToml, city: &str) -> ReaderConfig {
    let mut cfg = ReaderConfig::new(city);
    if let Some(start) = data.start {
        cfg = cfg.with_start(start);
    }
    if let Some(end) = data.end {
        cfg = cfg.with_end(end);
    }
    cfg
}
