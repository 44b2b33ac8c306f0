//! MSE / MAE scoring of aligned forecasts.

use nimbus_arima::ForecastResult;
use nimbus_series::TimeSeries;
use serde::Serialize;

use crate::error::EvaluateError;

/// Accuracy of one forecast against the held-out observations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScoreReport {
    /// Mean squared error.
    pub mse: f64,
    /// Mean absolute error.
    pub mae: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Number of compared points.
    pub n: usize,
}

/// Scores `forecast` against `actual`.
///
/// Both must carry the same timestamps in the same order.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`EvaluateError::Empty`] | no points to compare |
/// | [`EvaluateError::IndexMismatch`] | first position where timestamps differ or one side ends |
pub fn score(forecast: &ForecastResult, actual: &TimeSeries) -> Result<ScoreReport, EvaluateError> {
    let predicted = forecast.timestamps();
    let observed = actual.timestamps();
    for index in 0..predicted.len().max(observed.len()) {
        let f = predicted.get(index).copied();
        let a = observed.get(index).copied();
        if f != a {
            return Err(EvaluateError::IndexMismatch {
                index,
                forecast: f,
                actual: a,
            });
        }
    }
    score_values(&forecast.forecasts(), actual.values())
}

/// Scores two aligned value slices.
///
/// # Errors
///
/// Returns [`EvaluateError::Empty`] or [`EvaluateError::LengthMismatch`].
pub fn score_values(predicted: &[f64], actual: &[f64]) -> Result<ScoreReport, EvaluateError> {
    if predicted.len() != actual.len() {
        return Err(EvaluateError::LengthMismatch {
            forecast: predicted.len(),
            actual: actual.len(),
        });
    }
    if predicted.is_empty() {
        return Err(EvaluateError::Empty);
    }
    let n = predicted.len();
    let (sq, abs) = predicted
        .iter()
        .zip(actual)
        .fold((0.0, 0.0), |(sq, abs), (p, a)| {
            let e = a - p;
            (sq + e * e, abs + e.abs())
        });
    let mse = sq / n as f64;
    Ok(ScoreReport {
        mse,
        mae: abs / n as f64,
        rmse: mse.sqrt(),
        n,
    })
}
