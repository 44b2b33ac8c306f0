//! Multi-step forecasts with normal confidence intervals.
//!
//! Point forecasts propagate the Kalman filter's final state prediction
//! through the companion transition on the centred differenced scale, add
//! the mean back and integrate `d` times from the stored seeds. Starting
//! from the filtered state gives the exact conditional expectation for
//! short samples and near-unit MA roots, where one-step prediction errors
//! have not yet settled on the innovations.
//!
//! The forecast-error variance at horizon `h` is
//! `sigma2 * sum_{j<h} psi_j^2`, where `psi_j` are the impulse-response
//! weights. For `d > 0` two choices exist for the level intervals:
//!
//! | Method | psi weights of | Notes |
//! |--------|----------------|-------|
//! | [`IntervalMethod::Exact`] | `phi(L) (1 - L)^d` | matches the integrated model |
//! | [`IntervalMethod::IndependentIncrements`] | `phi(L)` | differenced variances are summed `d` times, ignoring their covariance |
//!
//! The second treats the differenced forecast errors as independent, which
//! understates level uncertainty whenever the ARMA part is persistent.

use ndarray::Array1;
use nimbus_calendar::{YearMonth, month_sequence};
use nimbus_series::undifference;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use crate::error::ArimaError;
use crate::fit::FittedModel;
use crate::state_space::StateSpace;

/// How level intervals are derived when the model is integrated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum IntervalMethod {
    /// psi weights of the integrated AR polynomial.
    #[default]
    Exact,
    /// Cumulative sums of differenced-scale variances.
    IndependentIncrements,
}

/// One forecast horizon.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Forecast month.
    pub timestamp: YearMonth,
    /// Point forecast.
    pub forecast: f64,
    /// Lower interval bound.
    pub lower: f64,
    /// Upper interval bound.
    pub upper: f64,
}

/// Forecasts for consecutive months after the training sample.
///
/// Invariant: `lower <= forecast <= upper` for every point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ForecastResult {
    points: Vec<ForecastPoint>,
    level: f64,
    method: IntervalMethod,
}

impl ForecastResult {
    /// Forecast points in horizon order.
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Number of horizons.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Confidence level of the intervals.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Interval method used.
    pub fn method(&self) -> IntervalMethod {
        self.method
    }

    /// Forecast months.
    pub fn timestamps(&self) -> Vec<YearMonth> {
        self.points.iter().map(|pt| pt.timestamp).collect()
    }

    /// Point forecasts.
    pub fn forecasts(&self) -> Vec<f64> {
        self.points.iter().map(|pt| pt.forecast).collect()
    }
}

impl FittedModel {
    /// Forecasts `steps` months ahead with `level` intervals (e.g. 0.95)
    /// using [`IntervalMethod::Exact`].
    ///
    /// # Errors
    ///
    /// Returns [`ArimaError::InvalidArgument`] if `steps == 0` or `level`
    /// is not strictly between 0 and 1.
    pub fn forecast(&self, steps: usize, level: f64) -> Result<ForecastResult, ArimaError> {
        self.forecast_with(steps, level, IntervalMethod::default())
    }

    /// Like [`FittedModel::forecast()`] with an explicit interval method.
    ///
    /// # Errors
    ///
    /// Same as [`FittedModel::forecast()`].
    #[tracing::instrument(skip(self), fields(order = %self.order()))]
    pub fn forecast_with(
        &self,
        steps: usize,
        level: f64,
        method: IntervalMethod,
    ) -> Result<ForecastResult, ArimaError> {
        if steps == 0 {
            return Err(ArimaError::InvalidArgument {
                name: "steps",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(level > 0.0 && level < 1.0) {
            return Err(ArimaError::InvalidArgument {
                name: "level",
                reason: format!("{level} is not in (0, 1)"),
            });
        }

        let d = self.order().d();
        let differenced = self.differenced_forecasts(steps);
        let points = if d == 0 {
            differenced
        } else {
            undifference(&differenced, self.seeds())
        };

        let variances = match method {
            IntervalMethod::Exact => {
                let ar = integrate_ar(self.ar(), d);
                horizon_variances(&ar, self.ma(), self.sigma2(), steps)
            }
            IntervalMethod::IndependentIncrements => {
                let mut v = horizon_variances(self.ar(), self.ma(), self.sigma2(), steps);
                for _ in 0..d {
                    cumulative_sum(&mut v);
                }
                v
            }
        };

        // Standard normal parameters are always valid.
        let z = Normal::standard().inverse_cdf(0.5 + level / 2.0);
        let timestamps = month_sequence(self.last_timestamp().next(), steps);
        let points: Vec<ForecastPoint> = timestamps
            .into_iter()
            .zip(points.iter().zip(variances.iter()))
            .map(|(timestamp, (&forecast, &var))| {
                let half = z * var.max(0.0).sqrt();
                ForecastPoint {
                    timestamp,
                    forecast,
                    lower: forecast - half,
                    upper: forecast + half,
                }
            })
            .collect();
        debug!(steps, z, ?method, "forecast complete");

        Ok(ForecastResult {
            points,
            level,
            method,
        })
    }

    /// Point forecasts of the differenced series: `mu + (T^(h-1) a[n+1])[0]`.
    fn differenced_forecasts(&self, steps: usize) -> Vec<f64> {
        let ss = StateSpace::new(self.ar(), self.ma());
        let mu = self.mean();
        let mut state = Array1::from(self.predicted_state().to_vec());
        let mut out = Vec::with_capacity(steps);
        for _ in 0..steps {
            out.push(state[0] + mu);
            state = ss.transition().dot(&state);
        }
        out
    }
}

/// AR coefficients of `phi(L) (1 - L)^d`.
fn integrate_ar(ar: &[f64], d: usize) -> Vec<f64> {
    let mut poly: Vec<f64> = std::iter::once(1.0).chain(ar.iter().map(|a| -a)).collect();
    for _ in 0..d {
        let mut next = vec![0.0; poly.len() + 1];
        for (k, c) in poly.iter().enumerate() {
            next[k] += c;
            next[k + 1] -= c;
        }
        poly = next;
    }
    poly[1..].iter().map(|c| -c).collect()
}

/// Impulse-response weights `psi_0..psi_{steps-1}`.
fn psi_weights(ar: &[f64], ma: &[f64], steps: usize) -> Vec<f64> {
    let mut psi = vec![0.0; steps];
    psi[0] = 1.0;
    for j in 1..steps {
        let mut v = if j <= ma.len() { ma[j - 1] } else { 0.0 };
        for (i, phi) in ar.iter().enumerate().take(j) {
            v += phi * psi[j - 1 - i];
        }
        psi[j] = v;
    }
    psi
}

/// `sigma2 * cumsum(psi^2)`.
fn horizon_variances(ar: &[f64], ma: &[f64], sigma2: f64, steps: usize) -> Vec<f64> {
    let mut v: Vec<f64> = psi_weights(ar, ma, steps)
        .into_iter()
        .map(|p| sigma2 * p * p)
        .collect();
    cumulative_sum(&mut v);
    v
}

fn cumulative_sum(v: &mut [f64]) {
    let mut acc = 0.0;
    for x in v.iter_mut() {
        acc += *x;
        *x = acc;
    }
}
