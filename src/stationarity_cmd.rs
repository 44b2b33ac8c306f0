//! Stationarity command: ADF tests on the training series.

use anyhow::{Context, Result};
use tracing::info_span;

use nimbus_series::split_train_test;
use nimbus_stationarity::{Significance, StationarityReport};

use crate::cli::StationarityArgs;
use crate::config::NimbusConfig;
use crate::convert;
use crate::forecast_cmd::load_series;

/// Run ADF on the level and differenced training series and print both.
///
/// The differencing order is the model's `d`, or 1 when `d` is 0.
pub fn run(args: StationarityArgs) -> Result<()> {
    let _cmd = info_span!("stationarity").entered();
    let config = NimbusConfig::load(&args.config)?;
    let adf = convert::build_adf_config(&config.stationarity)?;

    let (city, series) = load_series(&config, args.city)?;
    let (train, _) = split_train_test(&series, config.split.train_fraction)
        .context("failed to split series into train and test")?;

    let d = config.model.order[1].max(1);
    let level = adf
        .test(train.values())
        .context("ADF test on training levels failed")?;
    let differenced = train
        .difference(d)
        .context("failed to difference training series")?;
    let diff = adf
        .test(differenced.values())
        .with_context(|| format!("ADF test on training series differenced {d} time(s) failed"))?;

    println!("{city}: {} training months", train.len());
    println!(
        "{:<12} {:>10} {:>8} {:>5} {:>5} {:>9} {:>9} {:>9}  stationary at 5%",
        "series", "statistic", "p-value", "lags", "nobs", "1%", "5%", "10%"
    );
    print_row("level", &level);
    print_row(&format!("diff (d={d})"), &diff);
    Ok(())
}

fn print_row(label: &str, r: &StationarityReport) {
    let cv = |s| r.critical_value(s).unwrap_or(f64::NAN);
    println!(
        "{:<12} {:>10.4} {:>8.4} {:>5} {:>5} {:>9.4} {:>9.4} {:>9.4}  {}",
        label,
        r.statistic(),
        r.p_value(),
        r.lags_used(),
        r.nobs(),
        cv(Significance::OnePercent),
        cv(Significance::FivePercent),
        cv(Significance::TenPercent),
        if r.is_stationary(Significance::FivePercent) {
            "yes"
        } else {
            "no"
        }
    );
}
