//! Results table and plot export driven by a real pipeline run.

use nimbus_arima::ArimaOrder;
use nimbus_calendar::YearMonth;
use nimbus_io::{CsvResultsStore, PlotData, write_plot_data};
use nimbus_pipeline::{ForecastPipeline, PipelineConfig};
use nimbus_series::{TimeSeries, split_train_test};

fn seasonal(n: usize) -> TimeSeries {
    // Noise-like but deterministic: a logistic-map driven wobble around 12.
    let mut x = 0.37_f64;
    let values = (0..n)
        .map(|_| {
            x = 3.9 * x * (1.0 - x);
            12.0 + 2.0 * (x - 0.5)
        })
        .collect();
    TimeSeries::monthly(YearMonth::new(1980, 1).unwrap(), values).unwrap()
}

#[test]
fn test_pipeline_rows_land_in_results_table() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CsvResultsStore::new(dir.path().join("arima_model.csv"));
    let pipeline = ForecastPipeline::new(PipelineConfig::new(ArimaOrder::new(1, 0, 0)));

    let series = seasonal(96);
    let first = pipeline.run_split("Rome", &series, 0.75, &mut store).unwrap();
    let second = pipeline.run_split("Oslo", &series, 0.75, &mut store).unwrap();

    let rows = store.records().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].0, 1);
    assert_eq!(rows[1].0, 2);
    assert_eq!(&rows[0].1, first.record());
    assert_eq!(&rows[1].1, second.record());
    assert_eq!(rows[0].1.train_start, "1980-01");
    assert_eq!(rows[0].1.test_end, "1987-12");
}

#[test]
fn test_plot_data_json() {
    let dir = tempfile::tempdir().unwrap();
    let series = seasonal(60);
    let (train, test) = split_train_test(&series, 0.8).unwrap();
    let model = PipelineConfig::new(ArimaOrder::new(1, 0, 0))
        .arima_spec()
        .fit(&train)
        .unwrap();
    let forecast = model.forecast(test.len(), 0.95).unwrap();

    let data = PlotData::new("Rome", &train, &test, &model, forecast.points());
    assert_eq!(data.errors.len(), test.len());
    assert_eq!(data.residuals.len(), model.residuals().len());

    let path = dir.path().join("plot.json");
    write_plot_data(&path, &data).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["city"], "Rome");
    assert_eq!(json["train"]["timestamps"][0], "1980-01");
    assert_eq!(json["forecast"].as_array().unwrap().len(), 12);
    assert_eq!(json["forecast"][0]["timestamp"], "1984-01");
    assert_eq!(json["acf_train"][0], 1.0);
    assert_eq!(json["pacf_train"][0], 1.0);
    assert_eq!(json["pacf_train"].as_array().unwrap().len(), 25);
    assert_eq!(json["pacf_train_diff"].as_array().unwrap().len(), 25);
    assert_eq!(json["pacf_train"][1], json["acf_train"][1]);
}
