//! The pipeline driver.

use nimbus_arima::{FittedModel, ForecastResult};
use nimbus_evaluate::ScoreReport;
use nimbus_series::{TimeSeries, split_train_test};
use nimbus_stationarity::StationarityReport;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::{PartialRun, PipelineError, PipelineFailure};
use crate::record::ModelRecord;
use crate::sink::ResultsSink;

/// Everything a successful run produced.
#[derive(Clone, Debug)]
pub struct ForecastRun {
    level_adf: StationarityReport,
    diff_adf: StationarityReport,
    model: FittedModel,
    forecast: ForecastResult,
    score: ScoreReport,
    record: ModelRecord,
}

impl ForecastRun {
    /// ADF report on the training levels.
    pub fn level_adf(&self) -> &StationarityReport {
        &self.level_adf
    }

    /// ADF report on the differenced training series.
    pub fn diff_adf(&self) -> &StationarityReport {
        &self.diff_adf
    }

    pub fn model(&self) -> &FittedModel {
        &self.model
    }

    pub fn forecast(&self) -> &ForecastResult {
        &self.forecast
    }

    pub fn score(&self) -> &ScoreReport {
        &self.score
    }

    /// The record that was written to the sink.
    pub fn record(&self) -> &ModelRecord {
        &self.record
    }
}

/// Runs the forecasting stages for one series under a fixed configuration.
///
/// A pipeline holds no state between runs; the same instance can serve
/// any number of cities.
#[derive(Clone, Debug)]
pub struct ForecastPipeline {
    config: PipelineConfig,
}

impl ForecastPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs every stage on a pre-split series.
    ///
    /// The forecast horizon is `test.len()`. On success the record has
    /// already been written to `sink`.
    ///
    /// # Errors
    ///
    /// Returns a [`PipelineFailure`] holding the first stage error and the
    /// results of the stages that completed before it.
    #[tracing::instrument(skip_all, fields(city = %city, order = %self.config.order()))]
    pub fn run(
        &self,
        city: &str,
        train: &TimeSeries,
        test: &TimeSeries,
        sink: &mut dyn ResultsSink,
    ) -> Result<ForecastRun, PipelineFailure> {
        let cfg = &self.config;
        let mut partial = PartialRun::default();
        info!(train = train.len(), test = test.len(), "starting run");

        let level_adf = stage(&mut partial, cfg.adf().test(train.values()), |source| {
            PipelineError::Stationarity {
                series: "level",
                source,
            }
        })?;
        info!(
            statistic = level_adf.statistic(),
            p_value = level_adf.p_value(),
            "level ADF"
        );
        partial.level_adf = Some(level_adf.clone());

        let d = cfg.order().d().max(1);
        let differenced = stage(&mut partial, train.difference(d), PipelineError::Series)?;
        let diff_adf = stage(
            &mut partial,
            cfg.adf().test(differenced.values()),
            |source| PipelineError::Stationarity {
                series: "differenced",
                source,
            },
        )?;
        info!(
            d,
            statistic = diff_adf.statistic(),
            p_value = diff_adf.p_value(),
            "differenced ADF"
        );
        partial.diff_adf = Some(diff_adf.clone());

        let model = stage(&mut partial, cfg.arima_spec().fit(train), PipelineError::Fit)?;
        partial.model = Some(model.clone());
        if cfg.strict_convergence() {
            stage(
                &mut partial,
                model.ensure_converged().map(|_| ()),
                PipelineError::Fit,
            )?;
        }
        info!(
            log_likelihood = model.log_likelihood(),
            aic = model.aic(),
            "model fitted"
        );

        let forecast = stage(
            &mut partial,
            model.forecast_with(test.len(), cfg.confidence_level(), cfg.interval()),
            PipelineError::Forecast,
        )?;
        partial.forecast = Some(forecast.clone());

        let score = stage(
            &mut partial,
            nimbus_evaluate::score(&forecast, test),
            PipelineError::Score,
        )?;
        info!(mse = score.mse, mae = score.mae, "forecast scored");
        partial.score = Some(score);

        let record = ModelRecord::from_run(
            city, train, test, &level_adf, &diff_adf, &model, &forecast, &score,
        );
        partial.record = Some(record.clone());
        stage(&mut partial, sink.write(&record), PipelineError::Sink)?;

        Ok(ForecastRun {
            level_adf,
            diff_adf,
            model,
            forecast,
            score,
            record,
        })
    }

    /// Splits `series` chronologically at `train_fraction` and runs every
    /// stage on the two parts.
    pub fn run_split(
        &self,
        city: &str,
        series: &TimeSeries,
        train_fraction: f64,
        sink: &mut dyn ResultsSink,
    ) -> Result<ForecastRun, PipelineFailure> {
        let (train, test) = split_train_test(series, train_fraction).map_err(|e| {
            PipelineFailure::new(PipelineError::Series(e), PartialRun::default())
        })?;
        self.run(city, &train, &test, sink)
    }
}

/// Wraps a stage error, moving the accumulated partial results into the
/// failure.
fn stage<T, E>(
    partial: &mut PartialRun,
    result: Result<T, E>,
    wrap: impl FnOnce(E) -> PipelineError,
) -> Result<T, PipelineFailure> {
    result.map_err(|e| PipelineFailure::new(wrap(e), std::mem::take(partial)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{MemorySink, SinkError};
    use nimbus_arima::ArimaOrder;
    use nimbus_calendar::YearMonth;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    struct FailingSink;

    impl ResultsSink for FailingSink {
        fn write(&mut self, _record: &ModelRecord) -> Result<(), SinkError> {
            Err("store unavailable".into())
        }
    }

    fn wave(n: usize) -> TimeSeries {
        let mut rng = rand::rngs::StdRng::seed_from_u64(21);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let mut x = 0.0;
        let values = (0..n)
            .map(|_| {
                x = 0.4 * x + normal.sample(&mut rng);
                15.0 + x
            })
            .collect();
        TimeSeries::monthly(YearMonth::new(1990, 1).unwrap(), values).unwrap()
    }

    #[test]
    fn test_sink_failure_keeps_record() {
        let pipeline = ForecastPipeline::new(PipelineConfig::new(ArimaOrder::new(1, 0, 0)));
        let failure = pipeline
            .run_split("Lima", &wave(80), 0.75, &mut FailingSink)
            .unwrap_err();
        assert_eq!(failure.error.stage(), "record");
        let partial = failure.partial;
        assert!(partial.level_adf.is_some());
        assert!(partial.diff_adf.is_some());
        assert!(partial.model.is_some());
        assert_eq!(partial.forecast.as_ref().map(|f| f.len()), Some(20));
        assert!(partial.score.is_some());
        assert_eq!(partial.record.map(|r| r.city), Some("Lima".to_string()));
    }

    #[test]
    fn test_bad_fraction_fails_before_any_stage() {
        let pipeline = ForecastPipeline::new(PipelineConfig::new(ArimaOrder::new(1, 0, 0)));
        let mut sink = MemorySink::new();
        let failure = pipeline
            .run_split("Lima", &wave(40), 1.5, &mut sink)
            .unwrap_err();
        assert!(matches!(failure.error, PipelineError::Series(_)));
        assert!(failure.partial.level_adf.is_none());
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_strict_convergence_fails_fit() {
        let config = PipelineConfig::new(ArimaOrder::new(2, 0, 1))
            .with_max_iters(2)
            .with_strict_convergence(true);
        let mut sink = MemorySink::new();
        let failure = ForecastPipeline::new(config)
            .run_split("Lima", &wave(80), 0.75, &mut sink)
            .unwrap_err();
        assert_eq!(failure.error.stage(), "fit");
        assert!(failure.partial.model.is_some());
        assert!(failure.partial.forecast.is_none());
        assert!(sink.records().is_empty());
    }
}
