//! Configuration for a pipeline run.

use nimbus_arima::{ArimaOrder, ArimaSpec, IntervalMethod};
use nimbus_stationarity::AdfConfig;

/// Settings threaded through every stage of a [`ForecastPipeline`] run.
///
/// [`ForecastPipeline`]: crate::ForecastPipeline
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    order: ArimaOrder,
    confidence_level: f64,
    adf: AdfConfig,
    interval: IntervalMethod,
    strict_convergence: bool,
    max_iters: Option<u64>,
}

impl PipelineConfig {
    /// Default two-sided confidence level for forecast intervals.
    pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

    /// Creates a configuration for `order` with default settings.
    pub fn new(order: ArimaOrder) -> Self {
        Self {
            order,
            confidence_level: Self::DEFAULT_CONFIDENCE_LEVEL,
            adf: AdfConfig::default(),
            interval: IntervalMethod::default(),
            strict_convergence: false,
            max_iters: None,
        }
    }

    /// Sets the forecast confidence level, in `(0, 1)`.
    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    /// Sets the ADF settings used for both stationarity tests.
    pub fn with_adf(mut self, adf: AdfConfig) -> Self {
        self.adf = adf;
        self
    }

    /// Sets how intervals are integrated when `d > 0`.
    pub fn with_interval(mut self, interval: IntervalMethod) -> Self {
        self.interval = interval;
        self
    }

    /// When `true`, a fit that hits the iteration limit fails the run.
    pub fn with_strict_convergence(mut self, strict: bool) -> Self {
        self.strict_convergence = strict;
        self
    }

    /// Overrides the optimiser iteration limit, which otherwise scales
    /// with the order (see [`ArimaSpec::max_iters()`]).
    pub fn with_max_iters(mut self, max_iters: u64) -> Self {
        self.max_iters = Some(max_iters);
        self
    }

    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    pub fn adf(&self) -> &AdfConfig {
        &self.adf
    }

    pub fn interval(&self) -> IntervalMethod {
        self.interval
    }

    pub fn strict_convergence(&self) -> bool {
        self.strict_convergence
    }

    pub fn max_iters(&self) -> Option<u64> {
        self.max_iters
    }

    /// The estimation settings derived from this configuration.
    pub fn arima_spec(&self) -> ArimaSpec {
        let spec = ArimaSpec::new(self.order);
        match self.max_iters {
            Some(max_iters) => spec.with_max_iters(max_iters),
            None => spec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_stationarity::Regression;

    #[test]
    fn test_defaults() {
        let cfg = PipelineConfig::new(ArimaOrder::new(1, 0, 0));
        assert_eq!(cfg.confidence_level(), 0.95);
        assert_eq!(cfg.interval(), IntervalMethod::Exact);
        assert!(!cfg.strict_convergence());
        assert_eq!(cfg.max_iters(), None);
        assert_eq!(cfg.adf().regression(), Regression::Constant);
    }

    #[test]
    fn test_default_iterations_follow_order() {
        let cfg = PipelineConfig::new(ArimaOrder::new(7, 1, 3));
        assert_eq!(cfg.arima_spec().max_iters(), 5000);
    }

    #[test]
    fn test_builders_and_spec() {
        let cfg = PipelineConfig::new(ArimaOrder::new(2, 1, 1))
            .with_confidence_level(0.8)
            .with_adf(AdfConfig::new().with_regression(Regression::ConstantTrend))
            .with_interval(IntervalMethod::IndependentIncrements)
            .with_strict_convergence(true)
            .with_max_iters(250);
        assert_eq!(cfg.confidence_level(), 0.8);
        assert_eq!(cfg.adf().regression(), Regression::ConstantTrend);
        assert!(cfg.strict_convergence());
        let spec = cfg.arima_spec();
        assert_eq!(spec.order(), ArimaOrder::new(2, 1, 1));
        assert_eq!(spec.max_iters(), 250);
        assert!(!spec.include_mean());
    }
}
