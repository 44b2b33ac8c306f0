//! Kalman filter for ARMA likelihood evaluation.
//!
//! Runs the univariate filter over the state space from
//! [`crate::state_space`] with `sigma2` concentrated out: covariances are
//! carried in units of `sigma2`, which is then estimated in closed form
//! from the standardised prediction errors.
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2};

use crate::state_space::StateSpace;

/// Prediction-error decomposition of a filtered series.
#[derive(Clone, Debug)]
pub(crate) struct KalmanOutput {
    /// One-step-ahead prediction errors `v[t]`.
    pub residuals: Vec<f64>,
    /// Maximum-likelihood innovation variance.
    pub sigma2: f64,
    /// Concentrated Gaussian log-likelihood.
    pub log_likelihood: f64,
    /// State prediction `a[n+1 | n]` after the last observation.
    pub predicted_state: Vec<f64>,
}

/// Filters zero-mean `data` and returns errors, `sigma2` and log-likelihood.
///
/// Returns `None` when the model has no stationary initial covariance or a
/// prediction variance stops being positive and finite.
pub(crate) fn kalman_full(ss: &StateSpace, data: &[f64]) -> Option<KalmanOutput> {
    let n = data.len();
    if n == 0 {
        return None;
    }
    let t = ss.transition();
    let rrt = ss.rrt();
    let mut a = Array1::<f64>::zeros(ss.dim());
    let mut p = ss.initial_covariance()?;

    let mut residuals = Vec::with_capacity(n);
    let mut sum_scaled_sq = 0.0;
    let mut sum_log_f = 0.0;

    for &y in data {
        let v = y - a[0];
        let f = p[[0, 0]];
        if !(f.is_finite() && f > 0.0) {
            return None;
        }
        let gain = p.column(0).to_owned() / f;
        let p_row = p.row(0).to_owned();

        a = t.dot(&(a + &gain * v));
        let outer = Array2::from_shape_fn(p.dim(), |(i, j)| gain[i] * p_row[j]);
        p = t.dot(&(p - outer)).dot(&t.t()) + rrt;

        residuals.push(v);
        sum_scaled_sq += v * v / f;
        sum_log_f += f.ln();
    }

    let nf = n as f64;
    let sigma2 = sum_scaled_sq / nf;
    if !(sigma2.is_finite() && sigma2 > 0.0) {
        return None;
    }
    let log_likelihood =
        -0.5 * nf * ((2.0 * std::f64::consts::PI).ln() + 1.0 + sigma2.ln()) - 0.5 * sum_log_f;

    Some(KalmanOutput {
        residuals,
        sigma2,
        log_likelihood,
        predicted_state: a.to_vec(),
    })
}

/// Concentrated log-likelihood only, for the optimiser.
pub(crate) fn kalman_concentrated_loglik(ss: &StateSpace, data: &[f64]) -> Option<f64> {
    kalman_full(ss, data).map(|out| out.log_likelihood)
}
