//! Ordinary least squares for the ADF regression.
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2};
use nimbus_stats::linalg;

use crate::error::StationarityError;

/// Result of an OLS fit of `y` on the columns of `x`.
#[derive(Clone, Debug)]
pub(crate) struct OlsFit {
    params: Array1<f64>,
    xtx_inv: Array2<f64>,
    ssr: f64,
    nobs: usize,
}

impl OlsFit {
    /// Fits `y = x * beta + e` via the normal equations.
    pub(crate) fn fit(y: &Array1<f64>, x: &Array2<f64>) -> Result<Self, StationarityError> {
        let (nobs, k) = x.dim();
        let singular = StationarityError::SingularRegression { n: nobs, regressors: k };
        if nobs <= k {
            return Err(singular);
        }
        let xt = x.t();
        let xtx = xt.dot(x);
        let xtx_inv = linalg::invert(&xtx).ok_or(singular)?;
        let params = xtx_inv.dot(&xt.dot(y));
        let resid = y - &x.dot(&params);
        let ssr = resid.dot(&resid);
        Ok(Self {
            params,
            xtx_inv,
            ssr,
            nobs,
        })
    }

    pub(crate) fn params(&self) -> &Array1<f64> {
        &self.params
    }

    pub(crate) fn ssr(&self) -> f64 {
        self.ssr
    }

    fn k(&self) -> usize {
        self.params.len()
    }

    /// t-value of coefficient `i` using the unbiased residual variance.
    ///
    /// An exact fit gives a zero standard error: the t-value is then 0 for
    /// a zero coefficient and signed infinity otherwise.
    pub(crate) fn t_value(&self, i: usize) -> f64 {
        let scale = self.ssr / (self.nobs - self.k()) as f64;
        let se = (scale * self.xtx_inv[[i, i]]).max(0.0).sqrt();
        let coef = self.params[i];
        if se == 0.0 {
            return if coef == 0.0 {
                0.0
            } else {
                coef.signum() * f64::INFINITY
            };
        }
        coef / se
    }

    /// Gaussian log-likelihood at the OLS estimate.
    pub(crate) fn log_likelihood(&self) -> f64 {
        let n = self.nobs as f64;
        -0.5 * n * ((2.0 * std::f64::consts::PI).ln() + (self.ssr / n).ln() + 1.0)
    }

    /// `-2 llf + 2 k`.
    pub(crate) fn aic(&self) -> f64 {
        -2.0 * self.log_likelihood() + 2.0 * self.k() as f64
    }
}
