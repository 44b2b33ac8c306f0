//! Error types for the nimbus-arima crate.

use nimbus_series::SeriesError;

use crate::spec::ArimaOrder;

/// Error type for all fallible operations in the nimbus-arima crate.
///
/// Covers input validation, numerical failures during estimation and bad
/// forecasting arguments.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArimaError {
    /// Returned when the series is too short for the requested order.
    #[error("insufficient data for ARIMA{order}: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Order being fitted.
        order: ArimaOrder,
        /// Number of observations provided.
        n: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when the differenced series has zero variance.
    #[error("series is constant after differencing {d} time(s)")]
    ConstantData {
        /// Differencing order applied.
        d: usize,
    },

    /// Returned when the estimated AR polynomial is not stationary or the MA
    /// polynomial is not invertible.
    #[error("fitted {polynomial} polynomial has a root on or inside the unit circle: {coefficients:?}")]
    NonStationaryFit {
        /// `"AR"` or `"MA"`.
        polynomial: &'static str,
        /// Offending coefficients.
        coefficients: Vec<f64>,
    },

    /// Returned when the optimiser stops at its iteration limit.
    #[error(
        "optimisation did not converge after {iterations} iterations (log-likelihood {log_likelihood:.4})"
    )]
    FitDidNotConverge {
        /// Iterations performed.
        iterations: u64,
        /// Best log-likelihood reached.
        log_likelihood: f64,
        /// Best parameter vector in the optimiser's unconstrained space.
        params: Vec<f64>,
    },

    /// Returned when the optimiser itself fails.
    #[error("optimisation failed: {reason}")]
    OptimizationFailed {
        /// Underlying solver message.
        reason: String,
    },

    /// Returned when an argument is outside its valid domain.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Returned when differencing or integration fails.
    #[error(transparent)]
    Series(#[from] SeriesError),
}
