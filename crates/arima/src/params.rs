//! Coefficient parameterisations for ARMA estimation.
//!
//! The optimiser works in an unconstrained space. Each unconstrained value
//! is mapped through `tanh` to a partial autocorrelation in (-1, 1), and
//! the Levinson-Durbin recursion turns those into polynomial coefficients
//! (Jones 1980, Monahan 1984). `tanh` rounds to exactly +-1 for inputs
//! beyond about 19, so the partial autocorrelations are clamped to
//! [`PACF_BOUND`] before the recursion. The polynomial `1 - sum phi_i z^i`
//! built this way has its roots outside the unit circle, and stability is
//! checked on the partial autocorrelations rather than by stepping the
//! coefficients back down.
//!
//! MA coefficients use the negated transform so that `1 + sum theta_j z^j`
//! is invertible for any order.
//!
//! **Not part of the public API.**

use nimbus_stats::pacf;

/// Largest partial autocorrelation magnitude used for starting values.
const START_PACF_LIMIT: f64 = 0.95;

/// Largest partial autocorrelation magnitude the optimiser can reach.
pub(crate) const PACF_BOUND: f64 = 1.0 - 1e-6;

/// Maps unconstrained parameters to partial autocorrelations in
/// `[-PACF_BOUND, PACF_BOUND]`.
pub(crate) fn unconstrained_to_pacf(alpha: &[f64]) -> Vec<f64> {
    alpha
        .iter()
        .map(|a| a.tanh().clamp(-PACF_BOUND, PACF_BOUND))
        .collect()
}

/// `true` if every partial autocorrelation is finite and strictly inside
/// (-1, 1), i.e. the polynomial built from them is stable.
pub(crate) fn pacf_is_stable(r: &[f64]) -> bool {
    r.iter().all(|rk| rk.is_finite() && rk.abs() < 1.0)
}

/// Maps unconstrained parameters to stationary AR coefficients.
pub(crate) fn unconstrained_to_coeffs(alpha: &[f64]) -> Vec<f64> {
    pacf_to_coeffs(&unconstrained_to_pacf(alpha))
}

/// Maps unconstrained parameters to invertible MA coefficients.
pub(crate) fn unconstrained_to_ma(beta: &[f64]) -> Vec<f64> {
    unconstrained_to_coeffs(beta).into_iter().map(|c| -c).collect()
}

/// Levinson-Durbin: partial autocorrelations to polynomial coefficients.
fn pacf_to_coeffs(r: &[f64]) -> Vec<f64> {
    let p = r.len();
    let mut phi = vec![0.0; p];
    let mut prev = vec![0.0; p];
    for k in 0..p {
        prev[..k].copy_from_slice(&phi[..k]);
        phi[k] = r[k];
        for j in 0..k {
            phi[j] = prev[j] - r[k] * prev[k - 1 - j];
        }
    }
    phi
}

/// Starting values for the AR block: sample partial autocorrelations of
/// `data`, clamped and mapped back through `atanh`.
pub(crate) fn yule_walker_start(data: &[f64], p: usize) -> Vec<f64> {
    if p == 0 {
        return Vec::new();
    }
    let r = pacf(data, p);
    if r.is_empty() {
        return vec![0.0; p];
    }
    r[1..]
        .iter()
        .map(|rk| rk.clamp(-START_PACF_LIMIT, START_PACF_LIMIT).atanh())
        .collect()
}
