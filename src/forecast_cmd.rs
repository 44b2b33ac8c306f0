//! Forecast command: full test, fit, forecast and score run for one city.

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span, warn};

use nimbus_io::{CsvResultsStore, PlotData, read_city_series, write_plot_data};
use nimbus_pipeline::{ForecastPipeline, ForecastRun, MemorySink, ResultsSink};
use nimbus_series::{TimeSeries, split_train_test};

use crate::cli::ForecastArgs;
use crate::config::NimbusConfig;
use crate::convert;

/// Run the forecasting pipeline.
pub fn run(args: ForecastArgs) -> Result<()> {
    let _cmd = info_span!("forecast").entered();
    let config = NimbusConfig::load(&args.config)?;
    let pipeline_cfg = convert::build_pipeline_config(&config.model, &config.stationarity)?;

    let (city, series) = load_series(&config, args.city)?;
    let (train, test) = split_train_test(&series, config.split.train_fraction)
        .context("failed to split series into train and test")?;
    info!(train = train.len(), test = test.len(), "series split");

    let results_path = args.results.or(config.output.results);
    let mut store;
    let mut memory = MemorySink::new();
    let sink: &mut dyn ResultsSink = match &results_path {
        Some(path) => {
            store = CsvResultsStore::new(path);
            &mut store
        }
        None => &mut memory,
    };

    let pipeline = ForecastPipeline::new(pipeline_cfg);
    let run = match pipeline.run(&city, &train, &test, sink) {
        Ok(run) => run,
        Err(failure) => {
            if let Some(adf) = &failure.partial.level_adf {
                warn!(
                    statistic = adf.statistic(),
                    p_value = adf.p_value(),
                    "level ADF before failure"
                );
            }
            if let Some(adf) = &failure.partial.diff_adf {
                warn!(
                    statistic = adf.statistic(),
                    p_value = adf.p_value(),
                    "differenced ADF before failure"
                );
            }
            return Err(anyhow::Error::new(failure).context(format!("run failed for {city}")));
        }
    };
    if let Some(path) = &results_path {
        info!(path = %path.display(), "model record appended");
    }

    if let Some(path) = args.plot.or(config.output.plot) {
        let data = PlotData::new(&city, &train, &test, run.model(), run.forecast().points());
        write_plot_data(&path, &data)
            .with_context(|| format!("failed to write plot data: {}", path.display()))?;
        info!(path = %path.display(), "plot data written");
    }

    print_report(&city, &run);
    Ok(())
}

/// Reads the configured city's series, applying a CLI city override.
pub(crate) fn load_series(
    config: &NimbusConfig,
    city_override: Option<String>,
) -> Result<(String, TimeSeries)> {
    let path = config
        .data
        .path
        .as_ref()
        .ok_or_else(|| anyhow!("no input path: set [data].path in config"))?;
    let city = city_override
        .or_else(|| config.data.city.clone())
        .ok_or_else(|| anyhow!("no city: set [data].city in config or use --city"))?;

    let reader_cfg = convert::build_reader_config(&config.data, &city);
    info!(path = %path.display(), city = %city, "reading temperatures");
    let series = read_city_series(path, &reader_cfg)
        .with_context(|| format!("failed to read temperatures: {}", path.display()))?;
    Ok((city, series))
}

fn print_report(city: &str, run: &ForecastRun) {
    println!("{city}");
    println!(
        "ADF level       statistic {:>10.4}  p-value {:.4}",
        run.level_adf().statistic(),
        run.level_adf().p_value()
    );
    println!(
        "ADF differenced statistic {:>10.4}  p-value {:.4}",
        run.diff_adf().statistic(),
        run.diff_adf().p_value()
    );
    println!();
    println!("{}", run.model().summary());
    println!();

    let forecast = run.forecast();
    println!(
        "{:<8} {:>10} {:>10} {:>10}   ({:.0}% interval)",
        "month",
        "forecast",
        "lower",
        "upper",
        forecast.level() * 100.0
    );
    for p in forecast.points() {
        println!(
            "{:<8} {:>10.3} {:>10.3} {:>10.3}",
            p.timestamp.to_string(),
            p.forecast,
            p.lower,
            p.upper
        );
    }
    println!();
    let score = run.score();
    println!(
        "MSE {:.4}  MAE {:.4}  RMSE {:.4}  (n = {})",
        score.mse, score.mae, score.rmse, score.n
    );
}
