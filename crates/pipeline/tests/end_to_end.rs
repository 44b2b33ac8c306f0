//! Full runs on synthetic monthly series.

use approx::assert_abs_diff_eq;
use nimbus_arima::{ArimaError, ArimaOrder, IntervalMethod};
use nimbus_calendar::YearMonth;
use nimbus_pipeline::{ForecastPipeline, MemorySink, PipelineConfig, PipelineError};
use nimbus_series::{TimeSeries, split_train_test};
use nimbus_stationarity::Significance;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn noisy_constant(n: usize, seed: u64) -> TimeSeries {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let normal = Normal::new(15.0, 1.0).unwrap();
    let values = (0..n).map(|_| normal.sample(&mut rng)).collect();
    TimeSeries::monthly(YearMonth::new(2000, 1).unwrap(), values).unwrap()
}

#[test]
fn test_white_noise_around_fifteen() {
    let series = noisy_constant(120, 2024);
    let (train, test) = split_train_test(&series, 0.75).unwrap();
    assert_eq!((train.len(), test.len()), (90, 30));

    let pipeline = ForecastPipeline::new(PipelineConfig::new(ArimaOrder::new(1, 0, 0)));
    let mut sink = MemorySink::new();
    let run = pipeline.run("Cairo", &train, &test, &mut sink).unwrap();

    let phi = run.model().ar()[0];
    assert!(phi.abs() < 0.35, "phi = {phi}");
    assert_abs_diff_eq!(run.model().mean(), 15.0, epsilon = 0.4);

    let forecast = run.forecast();
    assert_eq!(forecast.len(), 30);
    assert_eq!(forecast.timestamps(), test.timestamps());
    for point in forecast.points() {
        assert_abs_diff_eq!(point.forecast, 15.0, epsilon = 1.0);
        assert!(point.lower < point.forecast && point.forecast < point.upper);
    }

    let score = run.score();
    assert!(score.mse > 0.4 && score.mse < 2.0, "mse = {}", score.mse);
    assert!(score.mae > 0.0);

    // White noise is stationary in levels.
    assert!(run.level_adf().is_stationary(Significance::FivePercent));
    assert_eq!(sink.records().len(), 1);
    assert_eq!(sink.records()[0], *run.record());
}

#[test]
fn test_record_fields() {
    let series = noisy_constant(120, 7);
    let pipeline = ForecastPipeline::new(
        PipelineConfig::new(ArimaOrder::new(1, 1, 0))
            .with_confidence_level(0.9)
            .with_interval(IntervalMethod::IndependentIncrements),
    );
    let mut sink = MemorySink::new();
    let run = pipeline.run_split("Oslo", &series, 0.9, &mut sink).unwrap();
    let record = run.record();

    assert_eq!(record.city, "Oslo");
    assert_eq!((record.order_p, record.order_d, record.order_q), (1, 1, 0));
    assert_eq!(record.forecast_steps, 12);
    assert_eq!(record.train_start, "2000-01");
    assert_eq!(record.train_end, "2008-12");
    assert_eq!(record.test_start, "2009-01");
    assert_eq!(record.test_end, "2009-12");
    assert_eq!(record.adf_stat, run.level_adf().statistic());
    assert_eq!(record.adf_pvalue_diff, run.diff_adf().p_value());
    assert_eq!(record.mse, run.score().mse);
    assert_eq!(record.mae, run.score().mae);
    assert!(record.model_summary.contains("ARIMA(1, 1, 0)"));
    assert_eq!(run.forecast().level(), 0.9);
    assert_eq!(run.forecast().method(), IntervalMethod::IndependentIncrements);
}

#[test]
fn test_linear_trend_keeps_adf_results_when_fit_fails() {
    let values = (0..60).map(|i| 10.0 + 0.5 * i as f64).collect();
    let series = TimeSeries::monthly(YearMonth::new(1995, 6).unwrap(), values).unwrap();
    let pipeline = ForecastPipeline::new(PipelineConfig::new(ArimaOrder::new(1, 1, 0)));
    let mut sink = MemorySink::new();

    let failure = pipeline.run_split("Quito", &series, 0.8, &mut sink).unwrap_err();
    assert!(matches!(
        failure.error,
        PipelineError::Fit(ArimaError::ConstantData { d: 1 })
    ));

    let level = failure.partial.level_adf.unwrap();
    assert!(level.p_value() > 0.05);
    let diff = failure.partial.diff_adf.unwrap();
    assert!(diff.p_value() < 0.05);
    assert!(failure.partial.model.is_none());
    assert!(sink.records().is_empty());
}

#[test]
fn test_empty_test_series_fails_at_forecast() {
    let series = noisy_constant(60, 3);
    let (train, rest) = series.split_at(60).unwrap();
    assert!(rest.is_empty());
    let pipeline = ForecastPipeline::new(PipelineConfig::new(ArimaOrder::new(1, 0, 0)));
    let mut sink = MemorySink::new();

    let failure = pipeline.run("Cairo", &train, &rest, &mut sink).unwrap_err();
    assert!(matches!(
        failure.error,
        PipelineError::Forecast(ArimaError::InvalidArgument { .. })
    ));
    assert!(failure.partial.model.is_some());
    assert!(failure.partial.forecast.is_none());
}

#[test]
fn test_pipeline_is_deterministic() {
    let series = noisy_constant(100, 99);
    let pipeline = ForecastPipeline::new(PipelineConfig::new(ArimaOrder::new(2, 0, 0)));
    let a = pipeline
        .run_split("Lagos", &series, 0.8, &mut MemorySink::new())
        .unwrap();
    let b = pipeline
        .run_split("Lagos", &series, 0.8, &mut MemorySink::new())
        .unwrap();
    assert_eq!(a.record(), b.record());
}

#[test]
fn test_seasonal_city_run_completes() {
    // An annual cycle differenced once leaves an MA part at its unit root.
    let mut rng = rand::rngs::StdRng::seed_from_u64(2);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let values = (0..156)
        .map(|t| {
            let phase = 2.0 * std::f64::consts::PI * f64::from(t) / 12.0;
            11.0 + 7.0 * phase.sin() + normal.sample(&mut rng)
        })
        .collect();
    let series = TimeSeries::monthly(YearMonth::new(2000, 1).unwrap(), values).unwrap();

    let pipeline = ForecastPipeline::new(PipelineConfig::new(ArimaOrder::new(2, 1, 2)));
    let mut sink = MemorySink::new();
    let run = pipeline.run_split("Rome", &series, 0.9, &mut sink).unwrap();

    assert_eq!(run.forecast().len(), 16);
    assert!(run.forecast().forecasts().iter().all(|f| f.is_finite()));
    assert!(run.score().mse.is_finite());
    assert_eq!(sink.records().len(), 1);
}
