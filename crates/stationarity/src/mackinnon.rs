//! MacKinnon response-surface tables for the single-series ADF test.
//!
//! p-values use the MacKinnon (1994) polynomial approximation pushed
//! through the standard normal CDF. Critical values use the MacKinnon
//! (2010) finite-sample surfaces `b0 + b1/n + b2/n^2 + b3/n^3`.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::config::Regression;

/// Per-regression coefficients of the 1994 p-value approximation.
struct PValueSurface {
    tau_max: f64,
    tau_min: f64,
    tau_star: f64,
    small_p: [f64; 3],
    large_p: [f64; 4],
}

const SURFACE_N: PValueSurface = PValueSurface {
    tau_max: f64::INFINITY,
    tau_min: -19.04,
    tau_star: -1.04,
    small_p: [0.6344, 1.2378, 0.032496],
    large_p: [0.4797, 0.93557, -0.06999, 0.033066],
};

const SURFACE_C: PValueSurface = PValueSurface {
    tau_max: 2.74,
    tau_min: -18.83,
    tau_star: -1.61,
    small_p: [2.1659, 1.4412, 0.038269],
    large_p: [1.7339, 0.93202, -0.12745, -0.010368],
};

const SURFACE_CT: PValueSurface = PValueSurface {
    tau_max: 0.7,
    tau_min: -16.18,
    tau_star: -2.89,
    small_p: [3.2512, 1.6047, 0.049588],
    large_p: [2.5261, 0.61654, -0.37956, -0.060285],
};

/// 2010 critical-value surfaces, rows are 1%, 5% and 10%.
const CRIT_N: [[f64; 4]; 3] = [
    [-2.56574, -2.2358, -3.627, 0.0],
    [-1.94100, -0.2686, -3.365, 31.223],
    [-1.61682, 0.2656, -2.714, 25.364],
];

const CRIT_C: [[f64; 4]; 3] = [
    [-3.43035, -6.5393, -16.786, -79.433],
    [-2.86154, -2.8903, -4.234, -40.040],
    [-2.56677, -1.5384, -2.809, 0.0],
];

const CRIT_CT: [[f64; 4]; 3] = [
    [-3.95877, -9.0531, -28.428, -134.155],
    [-3.41049, -4.3904, -9.036, -45.374],
    [-3.12705, -2.5856, -3.925, -22.380],
];

/// Significance labels in table row order.
pub(crate) const LEVELS: [&str; 3] = ["1%", "5%", "10%"];

fn surface(regression: Regression) -> &'static PValueSurface {
    match regression {
        Regression::None => &SURFACE_N,
        Regression::Constant => &SURFACE_C,
        Regression::ConstantTrend => &SURFACE_CT,
    }
}

fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Approximate p-value of an ADF statistic.
///
/// Statistics above the table maximum map to 1, below the minimum to 0.
pub fn p_value(statistic: f64, regression: Regression) -> f64 {
    let s = surface(regression);
    if statistic > s.tau_max {
        return 1.0;
    }
    if statistic < s.tau_min {
        return 0.0;
    }
    let poly = if statistic <= s.tau_star {
        polyval(&s.small_p, statistic)
    } else {
        polyval(&s.large_p, statistic)
    };
    // Standard normal parameters are always valid.
    Normal::standard().cdf(poly)
}

/// Finite-sample critical values at 1%, 5% and 10% for a regression with
/// `nobs` observations, in that order.
pub fn critical_values(regression: Regression, nobs: usize) -> [(&'static str, f64); 3] {
    let table = match regression {
        Regression::None => &CRIT_N,
        Regression::Constant => &CRIT_C,
        Regression::ConstantTrend => &CRIT_CT,
    };
    let inv = 1.0 / nobs as f64;
    let mut out = [("", 0.0); 3];
    for (slot, (label, row)) in out.iter_mut().zip(LEVELS.iter().zip(table.iter())) {
        *slot = (*label, polyval(row, inv));
    }
    out
}
