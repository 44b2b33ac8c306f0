//! ADF regression construction, lag selection and reporting.
//!
//! **Not part of the public API.**

use std::collections::BTreeMap;

use ndarray::{Array1, Array2};
use nimbus_stats::is_constant;
use tracing::{debug, info};

use crate::config::{AdfConfig, Autolag, Regression};
use crate::error::StationarityError;
use crate::mackinnon::{critical_values, p_value};
use crate::ols::OlsFit;
use crate::report::StationarityReport;

/// Relative tolerance for the degenerate constant checks.
const CONSTANT_TOL: f64 = 1e-9;

/// Schwert (1989) rule: `ceil(12 * (n / 100)^(1/4))`.
fn schwert_max_lag(n: usize) -> usize {
    (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize
}

#[tracing::instrument(skip_all, fields(n = values.len(), regression = %config.regression()))]
pub(crate) fn adf_test(
    values: &[f64],
    config: &AdfConfig,
) -> Result<StationarityReport, StationarityError> {
    let n = values.len();
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(StationarityError::NonFiniteData { index });
    }
    if n < config.min_obs() || n < 2 {
        return Err(StationarityError::InsufficientData {
            n,
            min: config.min_obs().max(2),
        });
    }

    let regression = config.regression();
    let n_trend = regression.n_trend();
    let cap = (n / 2)
        .checked_sub(n_trend + 1)
        .ok_or(StationarityError::InsufficientData {
            n,
            min: 2 * (n_trend + 1),
        })?;
    let max_lag = match config.max_lags() {
        Some(m) if m > cap => {
            return Err(StationarityError::InvalidArgument {
                name: "max_lags",
                reason: format!("{m} exceeds the largest lag {cap} supported by {n} observations"),
            });
        }
        Some(m) => m,
        None => schwert_max_lag(n).min(cap),
    };

    let diff: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();

    if is_constant(values, CONSTANT_TOL) {
        debug!("constant series, reporting as stationary");
        return Ok(report(f64::NEG_INFINITY, 0, n - 1, regression));
    }
    if is_constant(&diff, CONSTANT_TOL) {
        debug!("exact linear trend, level coefficient is zero");
        return Ok(report(0.0, 0, n - 1, regression));
    }

    let lags_used = match config.autolag() {
        Autolag::Aic if max_lag > 0 => select_lag(values, &diff, max_lag, regression)?,
        _ => max_lag,
    };

    let nobs = n - 1 - lags_used;
    let y = response(&diff, nobs);
    let x = design(values, &diff, lags_used, nobs, regression);
    let fit = OlsFit::fit(&y, &x)?;
    let statistic = fit.t_value(0);
    if statistic.is_nan() {
        return Err(StationarityError::SingularRegression {
            n: nobs,
            regressors: x.ncols(),
        });
    }
    debug!(gamma = fit.params()[0], ssr = fit.ssr(), "final regression");

    let out = report(statistic, lags_used, nobs, regression);
    info!(
        statistic = out.statistic(),
        p_value = out.p_value(),
        lags = lags_used,
        nobs,
        "ADF test complete"
    );
    Ok(out)
}

/// Picks the lag count minimising AIC, all candidates sharing the sample
/// that the largest lag allows.
fn select_lag(
    values: &[f64],
    diff: &[f64],
    max_lag: usize,
    regression: Regression,
) -> Result<usize, StationarityError> {
    let nobs = values.len() - 1 - max_lag;
    let y = response(diff, nobs);
    let mut best: Option<(usize, f64)> = None;
    for lags in 0..=max_lag {
        let x = design(values, diff, lags, nobs, regression);
        let aic = match OlsFit::fit(&y, &x) {
            Ok(fit) => fit.aic(),
            Err(_) => f64::INFINITY,
        };
        if !aic.is_finite() {
            debug!(lags, "skipping candidate with degenerate regression");
            continue;
        }
        if best.is_none_or(|(_, b)| aic < b) {
            best = Some((lags, aic));
        }
    }
    let (lags, aic) = best.ok_or(StationarityError::SingularRegression {
        n: nobs,
        regressors: 1 + regression.n_trend(),
    })?;
    debug!(lags, aic, max_lag, "lag selected by AIC");
    Ok(lags)
}

/// Last `nobs` first differences.
fn response(diff: &[f64], nobs: usize) -> Array1<f64> {
    Array1::from(diff[diff.len() - nobs..].to_vec())
}

/// Regressors for the last `nobs` differences: lagged level, `lags` lagged
/// differences, then the deterministic terms.
fn design(
    values: &[f64],
    diff: &[f64],
    lags: usize,
    nobs: usize,
    regression: Regression,
) -> Array2<f64> {
    let n_trend = regression.n_trend();
    let start = diff.len() - nobs;
    let mut x = Array2::zeros((nobs, 1 + lags + n_trend));
    for i in 0..nobs {
        let j = start + i;
        x[[i, 0]] = values[j];
        for k in 1..=lags {
            x[[i, k]] = diff[j - k];
        }
        if n_trend >= 1 {
            x[[i, lags + 1]] = 1.0;
        }
        if n_trend == 2 {
            x[[i, lags + 2]] = (i + 1) as f64;
        }
    }
    x
}

fn report(
    statistic: f64,
    lags_used: usize,
    nobs: usize,
    regression: Regression,
) -> StationarityReport {
    let critical: BTreeMap<String, f64> = critical_values(regression, nobs)
        .into_iter()
        .map(|(label, v)| (label.to_string(), v))
        .collect();
    StationarityReport::new(
        statistic,
        p_value(statistic, regression),
        critical,
        lags_used,
        nobs,
        regression,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Significance;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    fn white_noise(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let normal = Normal::new(15.0, 1.0).unwrap();
        (0..n).map(|_| normal.sample(&mut rng)).collect()
    }

    fn random_walk(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let mut level = 0.0;
        (0..n)
            .map(|_| {
                level += normal.sample(&mut rng);
                level
            })
            .collect()
    }

    #[test]
    fn schwert_rule() {
        assert_eq!(schwert_max_lag(100), 12);
        assert_eq!(schwert_max_lag(140), 14);
        assert_eq!(schwert_max_lag(20), 9);
    }

    #[test]
    fn design_layout() {
        let values = [1.0, 2.0, 4.0, 7.0, 11.0];
        let diff = [1.0, 2.0, 3.0, 4.0];
        let x = design(&values, &diff, 1, 3, Regression::ConstantTrend);
        // Rows are j = 1, 2, 3.
        assert_eq!(x.dim(), (3, 4));
        assert_eq!(x.row(0).to_vec(), vec![2.0, 1.0, 1.0, 1.0]);
        assert_eq!(x.row(2).to_vec(), vec![7.0, 3.0, 1.0, 3.0]);
        assert_eq!(response(&diff, 3).to_vec(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn white_noise_is_stationary() {
        let data = white_noise(200, 11);
        let r = adf_test(&data, &AdfConfig::new()).unwrap();
        assert!(r.p_value() < 0.05, "p = {}", r.p_value());
        assert!(r.is_stationary(Significance::FivePercent));
        assert_eq!(r.nobs(), 199 - r.lags_used());
    }

    #[test]
    fn random_walk_is_not_stationary() {
        let data = random_walk(200, 5);
        let r = adf_test(&data, &AdfConfig::new()).unwrap();
        assert!(r.p_value() > 0.05, "p = {}", r.p_value());
        assert!(!r.is_stationary(Significance::FivePercent));
    }

    #[test]
    fn fixed_lag_is_respected() {
        let data = white_noise(120, 3);
        let config = AdfConfig::new()
            .with_autolag(Autolag::Fixed)
            .with_max_lags(3);
        let r = adf_test(&data, &config).unwrap();
        assert_eq!(r.lags_used(), 3);
        assert_eq!(r.nobs(), 116);
    }

    #[test]
    fn max_lag_above_cap_rejected() {
        let data = white_noise(40, 3);
        let config = AdfConfig::new().with_max_lags(19);
        let err = adf_test(&data, &config).unwrap_err();
        assert!(matches!(err, StationarityError::InvalidArgument { name: "max_lags", .. }));
    }

    #[test]
    fn too_short() {
        let data = white_noise(10, 1);
        let err = adf_test(&data, &AdfConfig::new()).unwrap_err();
        assert_eq!(err, StationarityError::InsufficientData { n: 10, min: 20 });
    }

    #[test]
    fn non_finite_rejected() {
        let mut data = white_noise(30, 1);
        data[4] = f64::NAN;
        let err = adf_test(&data, &AdfConfig::new()).unwrap_err();
        assert_eq!(err, StationarityError::NonFiniteData { index: 4 });
    }

    #[test]
    fn constant_series_is_stationary() {
        let r = adf_test(&[3.0; 40], &AdfConfig::new()).unwrap();
        assert_eq!(r.statistic(), f64::NEG_INFINITY);
        assert_eq!(r.p_value(), 0.0);
        assert!(r.is_stationary(Significance::OnePercent));
    }

    #[test]
    fn linear_trend_is_not_stationary() {
        let data: Vec<f64> = (0..60).map(|t| 10.0 + 0.25 * t as f64).collect();
        let r = adf_test(&data, &AdfConfig::new()).unwrap();
        assert_eq!(r.statistic(), 0.0);
        assert_abs_diff_eq!(r.p_value(), 0.9585, epsilon = 1e-3);
    }

    #[test]
    fn trend_regression_runs() {
        let data: Vec<f64> = white_noise(150, 21)
            .iter()
            .enumerate()
            .map(|(t, v)| v + 0.05 * t as f64)
            .collect();
        let config = AdfConfig::new().with_regression(Regression::ConstantTrend);
        let r = adf_test(&data, &config).unwrap();
        assert_eq!(r.regression(), Regression::ConstantTrend);
        assert!(r.is_stationary(Significance::FivePercent));
    }
}
