//! JSON export of everything needed to chart one run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use nimbus_arima::{FittedModel, ForecastPoint};
use nimbus_series::TimeSeries;
use serde::Serialize;

use crate::error::IoError;

/// Lags reported in the autocorrelation and partial autocorrelation arrays.
const ACF_LAGS: usize = 24;

/// Chartable view of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct PlotData {
    pub city: String,
    pub train: TimeSeries,
    pub test: TimeSeries,
    pub forecast: Vec<ForecastPoint>,
    /// One-step in-sample residuals of the fitted model.
    pub residuals: Vec<f64>,
    /// `actual - forecast` over the test period.
    pub errors: Vec<f64>,
    /// Sample autocorrelations of the training levels, lag 0 first.
    pub acf_train: Vec<f64>,
    /// Sample autocorrelations of the first-differenced training series.
    pub acf_train_diff: Vec<f64>,
    /// Sample partial autocorrelations of the training levels, lag 0 first.
    pub pacf_train: Vec<f64>,
    /// Sample partial autocorrelations of the first-differenced training series.
    pub pacf_train_diff: Vec<f64>,
}

impl PlotData {
    pub fn new(
        city: &str,
        train: &TimeSeries,
        test: &TimeSeries,
        model: &FittedModel,
        forecast: &[ForecastPoint],
    ) -> Self {
        let errors = test
            .values()
            .iter()
            .zip(forecast)
            .map(|(actual, p)| actual - p.forecast)
            .collect();
        let diff = nimbus_series::difference(train.values(), 1).unwrap_or_default();
        Self {
            city: city.to_string(),
            train: train.clone(),
            test: test.clone(),
            forecast: forecast.to_vec(),
            residuals: model.residuals().to_vec(),
            errors,
            acf_train: acf(train.values()),
            acf_train_diff: acf(&diff),
            pacf_train: pacf(train.values()),
            pacf_train_diff: pacf(&diff),
        }
    }
}

/// Sample autocorrelations up to [`ACF_LAGS`]; empty for a constant or
/// single-point series.
fn acf(data: &[f64]) -> Vec<f64> {
    if data.len() < 2 {
        return Vec::new();
    }
    let max_lag = ACF_LAGS.min(data.len() - 1);
    let gamma = nimbus_stats::autocovariances(data, max_lag);
    if gamma[0] <= 0.0 {
        return Vec::new();
    }
    gamma.iter().map(|g| g / gamma[0]).collect()
}

/// Sample partial autocorrelations over the same lags as [`acf`].
fn pacf(data: &[f64]) -> Vec<f64> {
    if data.len() < 2 {
        return Vec::new();
    }
    nimbus_stats::pacf(data, ACF_LAGS.min(data.len() - 1))
}

/// Writes `data` to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be created and
/// [`IoError::Json`] if encoding fails.
pub fn write_plot_data(path: &Path, data: &PlotData) -> Result<(), IoError> {
    let io_error = |source| IoError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
    serde_json::to_writer_pretty(&mut writer, data).map_err(|e| IoError::Json {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    writer.flush().map_err(io_error)
}
