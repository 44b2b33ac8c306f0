use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Nimbus monthly temperature forecaster.
#[derive(Parser)]
#[command(
    name = "nimbus",
    version,
    about = "ARIMA forecasting of monthly city temperature series"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Test, fit, forecast and score one city's series.
    Forecast(ForecastArgs),
    /// Run ADF tests on the level and differenced training series.
    Stationarity(StationarityArgs),
}

/// Arguments for the `forecast` subcommand.
#[derive(clap::Args)]
pub struct ForecastArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "nimbus.toml")]
    pub config: PathBuf,

    /// Override the city from config.
    #[arg(long)]
    pub city: Option<String>,

    /// Override the results table path from config.
    #[arg(short, long)]
    pub results: Option<PathBuf>,

    /// Override the plot-data JSON path from config.
    #[arg(short, long)]
    pub plot: Option<PathBuf>,
}

/// Arguments for the `stationarity` subcommand.
#[derive(clap::Args)]
pub struct StationarityArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "nimbus.toml")]
    pub config: PathBuf,

    /// Override the city from config.
    #[arg(long)]
    pub city: Option<String>,
}
