//! Statistical helper functions shared by the nimbus forecasting crates.

pub mod linalg;

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Returns `true` when every element equals the first within `tol`
/// (relative to the largest magnitude, absolute below 1).
///
/// Empty slices count as constant.
pub fn is_constant(data: &[f64], tol: f64) -> bool {
    let Some(&first) = data.first() else {
        return true;
    };
    let scale = data.iter().fold(1.0_f64, |acc, x| acc.max(x.abs()));
    data.iter().all(|x| (x - first).abs() <= tol * scale)
}

/// Biased sample autocovariances (N denominator) for lags `0..=max_lag`.
///
/// Lags at or beyond the series length are reported as 0.0. The N
/// denominator keeps the implied Toeplitz matrix positive semi-definite,
/// which the Yule-Walker recursion relies on.
pub fn autocovariances(data: &[f64], max_lag: usize) -> Vec<f64> {
    let n = data.len();
    let mut gamma = vec![0.0; max_lag + 1];
    if n == 0 {
        return gamma;
    }
    let m = mean(data);
    for (lag, g) in gamma.iter_mut().enumerate() {
        if lag >= n {
            break;
        }
        let s: f64 = data[lag..]
            .iter()
            .zip(data.iter())
            .map(|(a, b)| (a - m) * (b - m))
            .sum();
        *g = s / n as f64;
    }
    gamma
}

/// Sample partial autocorrelations for lags `0..=max_lag`, lag 0 first
/// (always 1.0).
///
/// Runs the Durbin-Levinson recursion on [`autocovariances`]. Returns an
/// empty vector when `data` has no variance.
pub fn pacf(data: &[f64], max_lag: usize) -> Vec<f64> {
    let gamma = autocovariances(data, max_lag);
    if gamma[0] <= 0.0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(max_lag + 1);
    out.push(1.0);
    let mut phi: Vec<f64> = Vec::with_capacity(max_lag);
    let mut v = gamma[0];
    for k in 1..=max_lag {
        let acc: f64 = phi
            .iter()
            .enumerate()
            .map(|(j, c)| c * gamma[k - 1 - j])
            .sum();
        let rk = if v > 0.0 { (gamma[k] - acc) / v } else { 0.0 };
        let prev = phi.clone();
        for j in 0..k - 1 {
            phi[j] = prev[j] - rk * prev[k - 2 - j];
        }
        phi.push(rk);
        v *= 1.0 - rk * rk;
        out.push(rk);
    }
    out
}
