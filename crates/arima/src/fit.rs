//! Fitted ARIMA model results.

use std::fmt::Write as _;

use nimbus_calendar::YearMonth;

use crate::error::ArimaError;
use crate::spec::ArimaOrder;

/// Whether the optimiser met its tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Convergence {
    /// Tolerance met after `iterations` Nelder-Mead steps.
    Converged {
        /// Iterations performed (0 for closed-form fits).
        iterations: u64,
    },
    /// Iteration limit reached; the model holds the best point found.
    DidNotConverge {
        /// Iterations performed.
        iterations: u64,
        /// Best log-likelihood reached.
        log_likelihood: f64,
    },
}

impl Convergence {
    /// `true` for [`Convergence::Converged`].
    pub fn is_converged(&self) -> bool {
        matches!(self, Convergence::Converged { .. })
    }

    /// Iterations performed.
    pub fn iterations(&self) -> u64 {
        match *self {
            Convergence::Converged { iterations } => iterations,
            Convergence::DidNotConverge { iterations, .. } => iterations,
        }
    }
}

/// A fitted ARIMA(p,d,q) model produced by [`ArimaSpec::fit()`](crate::ArimaSpec::fit).
///
/// Immutable once built. The model is
///
/// ```text
/// w[t] = (1 - L)^d y[t]
/// (w[t] - mu) = sum phi_i (w[t-i] - mu) + e[t] + sum theta_j e[t-j]
/// ```
///
/// Besides the estimates it keeps what forecasting needs: the filter's
/// state prediction for the month after training, the `d` seeds for
/// integrating back to levels and the last training month.
///
/// ```mermaid
/// graph LR
///     B["FittedModel"] --> C[".ar() / .ma() / .mean()"]
///     B --> D[".sigma2() / .log_likelihood()"]
///     B --> E[".aic() / .bic() / .hqic()"]
///     B --> F[".forecast(steps, level)?"]
///     B --> G[".convergence() / .ensure_converged()?"]
/// ```
#[derive(Clone, Debug)]
pub struct FittedModel {
    order: ArimaOrder,
    ar: Vec<f64>,
    ma: Vec<f64>,
    mean: Option<f64>,
    sigma2: f64,
    residuals: Vec<f64>,
    log_likelihood: f64,
    convergence: Convergence,
    params: Vec<f64>,
    predicted_state: Vec<f64>,
    seeds: Vec<f64>,
    last_timestamp: YearMonth,
}

/// Everything the estimator hands over when building a [`FittedModel`].
#[derive(Clone, Debug)]
pub(crate) struct FitParts {
    pub order: ArimaOrder,
    pub ar: Vec<f64>,
    pub ma: Vec<f64>,
    pub mean: Option<f64>,
    pub sigma2: f64,
    pub residuals: Vec<f64>,
    pub log_likelihood: f64,
    pub convergence: Convergence,
    pub params: Vec<f64>,
    /// Centred state prediction `a[n+1 | n]` from the final filter pass.
    pub predicted_state: Vec<f64>,
    pub seeds: Vec<f64>,
    pub last_timestamp: YearMonth,
}

impl FittedModel {
    pub(crate) fn from_parts(parts: FitParts) -> Self {
        Self {
            order: parts.order,
            ar: parts.ar,
            ma: parts.ma,
            mean: parts.mean,
            sigma2: parts.sigma2,
            residuals: parts.residuals,
            log_likelihood: parts.log_likelihood,
            convergence: parts.convergence,
            params: parts.params,
            predicted_state: parts.predicted_state,
            seeds: parts.seeds,
            last_timestamp: parts.last_timestamp,
        }
    }

    /// Returns the `(p, d, q)` order.
    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    /// Returns the AR coefficients (`phi`).
    pub fn ar(&self) -> &[f64] {
        &self.ar
    }

    /// Returns the MA coefficients (`theta`).
    pub fn ma(&self) -> &[f64] {
        &self.ma
    }

    /// Returns the mean of the differenced series, or 0 when no mean term
    /// was estimated.
    pub fn mean(&self) -> f64 {
        self.mean.unwrap_or(0.0)
    }

    /// Returns `true` if a mean term was estimated.
    pub fn has_mean(&self) -> bool {
        self.mean.is_some()
    }

    /// Returns the innovation variance (`sigma2`).
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Returns the in-sample one-step-ahead prediction errors, one per
    /// differenced observation.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Returns the maximised log-likelihood.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Number of observations in the likelihood (after differencing).
    pub fn nobs(&self) -> usize {
        self.residuals.len()
    }

    /// Estimated parameters: AR, MA, mean (if any) and `sigma2`.
    pub fn n_params(&self) -> usize {
        self.ar.len() + self.ma.len() + usize::from(self.mean.is_some()) + 1
    }

    /// Returns how the optimiser finished.
    pub fn convergence(&self) -> Convergence {
        self.convergence
    }

    /// Returns `self` if the optimiser converged.
    ///
    /// # Errors
    ///
    /// Returns [`ArimaError::FitDidNotConverge`] carrying the iteration
    /// count, best log-likelihood and parameter vector otherwise.
    pub fn ensure_converged(&self) -> Result<&Self, ArimaError> {
        match self.convergence {
            Convergence::Converged { .. } => Ok(self),
            Convergence::DidNotConverge {
                iterations,
                log_likelihood,
            } => Err(ArimaError::FitDidNotConverge {
                iterations,
                log_likelihood,
                params: self.params.clone(),
            }),
        }
    }

    /// Akaike Information Criterion: `-2 llf + 2k`.
    pub fn aic(&self) -> f64 {
        -2.0 * self.log_likelihood + 2.0 * self.n_params() as f64
    }

    /// Bayesian Information Criterion: `-2 llf + k ln(n)`.
    pub fn bic(&self) -> f64 {
        -2.0 * self.log_likelihood + self.n_params() as f64 * (self.nobs() as f64).ln()
    }

    /// Hannan-Quinn Information Criterion: `-2 llf + 2k ln(ln(n))`.
    pub fn hqic(&self) -> f64 {
        -2.0 * self.log_likelihood + 2.0 * self.n_params() as f64 * (self.nobs() as f64).ln().ln()
    }

    /// Last training month; forecasts start the month after.
    pub fn last_timestamp(&self) -> YearMonth {
        self.last_timestamp
    }

    pub(crate) fn predicted_state(&self) -> &[f64] {
        &self.predicted_state
    }

    pub(crate) fn seeds(&self) -> &[f64] {
        &self.seeds
    }

    /// Plain-text estimation summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(s, "ARIMA{} results", self.order);
        let _ = writeln!(s, "  observations    {}", self.nobs());
        let _ = writeln!(s, "  log-likelihood  {:.4}", self.log_likelihood);
        let _ = writeln!(s, "  AIC             {:.4}", self.aic());
        let _ = writeln!(s, "  BIC             {:.4}", self.bic());
        let _ = writeln!(s, "  HQIC            {:.4}", self.hqic());
        if let Some(mean) = self.mean {
            let _ = writeln!(s, "  mean            {mean:.4}");
        }
        for (i, phi) in self.ar.iter().enumerate() {
            let _ = writeln!(s, "  ar.L{:<12}{phi:.4}", i + 1);
        }
        for (j, theta) in self.ma.iter().enumerate() {
            let _ = writeln!(s, "  ma.L{:<12}{theta:.4}", j + 1);
        }
        let _ = writeln!(s, "  sigma2          {:.4}", self.sigma2);
        let _ = match self.convergence {
            Convergence::Converged { iterations } => {
                write!(s, "  converged       yes ({iterations} iterations)")
            }
            Convergence::DidNotConverge { iterations, .. } => {
                write!(s, "  converged       no ({iterations} iterations)")
            }
        };
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn model(
        order: ArimaOrder,
        ar: Vec<f64>,
        ma: Vec<f64>,
        mean: Option<f64>,
        residuals: Vec<f64>,
    ) -> FittedModel {
        let dim = ar.len().max(ma.len() + 1);
        FittedModel::from_parts(FitParts {
            order,
            ar,
            ma,
            mean,
            sigma2: 1.0,
            residuals,
            log_likelihood: -100.0,
            convergence: Convergence::Converged { iterations: 12 },
            params: vec![],
            predicted_state: vec![0.0; dim],
            seeds: vec![0.0; order.d()],
            last_timestamp: YearMonth::new(2010, 12).unwrap(),
        })
    }

    #[test]
    fn accessors() {
        let m = model(
            ArimaOrder::new(2, 0, 1),
            vec![0.5, -0.3],
            vec![0.4],
            Some(15.0),
            vec![0.1; 50],
        );
        assert_eq!(m.order(), ArimaOrder::new(2, 0, 1));
        assert_eq!(m.ar(), &[0.5, -0.3]);
        assert_eq!(m.ma(), &[0.4]);
        assert_eq!(m.mean(), 15.0);
        assert!(m.has_mean());
        assert_eq!(m.nobs(), 50);
        assert_eq!(m.n_params(), 5);
    }

    #[test]
    fn information_criteria() {
        let m = model(ArimaOrder::new(1, 0, 1), vec![0.5], vec![0.3], None, vec![0.0; 100]);
        // k = 3
        assert_abs_diff_eq!(m.aic(), 206.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.bic(), 200.0 + 3.0 * 100f64.ln(), epsilon = 1e-12);
        assert_abs_diff_eq!(m.hqic(), 200.0 + 6.0 * 100f64.ln().ln(), epsilon = 1e-12);
        assert!(m.bic() > m.aic());
    }

    #[test]
    fn mean_defaults_to_zero_without_term() {
        let m = model(ArimaOrder::new(0, 1, 1), vec![], vec![0.2], None, vec![0.0; 5]);
        assert_eq!(m.mean(), 0.0);
        assert!(!m.has_mean());
    }

    #[test]
    fn ensure_converged_reports_best_point() {
        let mut m = model(ArimaOrder::new(1, 0, 0), vec![0.2], vec![], Some(1.0), vec![0.0; 5]);
        assert!(m.ensure_converged().is_ok());
        m.convergence = Convergence::DidNotConverge {
            iterations: 7,
            log_likelihood: -42.0,
        };
        m.params = vec![0.1, 0.2];
        let err = m.ensure_converged().unwrap_err();
        assert_eq!(
            err,
            ArimaError::FitDidNotConverge {
                iterations: 7,
                log_likelihood: -42.0,
                params: vec![0.1, 0.2],
            }
        );
        assert_eq!(m.convergence().iterations(), 7);
        assert!(!m.convergence().is_converged());
    }

    #[test]
    fn summary_lists_coefficients() {
        let m = model(
            ArimaOrder::new(1, 0, 1),
            vec![0.25],
            vec![-0.5],
            Some(14.9),
            vec![0.0; 20],
        );
        let s = m.summary();
        assert!(s.starts_with("ARIMA(1, 0, 1) results"));
        assert!(s.contains("ar.L1"));
        assert!(s.contains("0.2500"));
        assert!(s.contains("ma.L1"));
        assert!(s.contains("mean            14.9000"));
        assert!(s.contains("yes (12 iterations)"));
    }
}
