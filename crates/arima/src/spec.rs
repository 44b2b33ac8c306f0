//! ARIMA model specification (unfitted).

use std::fmt;

use nimbus_series::TimeSeries;
use serde::Serialize;

use crate::error::ArimaError;
use crate::fit::FittedModel;

/// Autoregressive, differencing and moving-average orders `(p, d, q)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ArimaOrder {
    p: usize,
    d: usize,
    q: usize,
}

impl ArimaOrder {
    /// Creates an order triple. `(0, d, 0)` is allowed and yields a
    /// random-walk (d > 0) or mean (d = 0) forecast.
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// AR order.
    pub fn p(&self) -> usize {
        self.p
    }

    /// Differencing order.
    pub fn d(&self) -> usize {
        self.d
    }

    /// MA order.
    pub fn q(&self) -> usize {
        self.q
    }

    /// Minimum number of level observations needed to fit: `p + d + q + 1`.
    pub fn min_observations(&self) -> usize {
        self.p + self.d + self.q + 1
    }
}

impl fmt::Display for ArimaOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.p, self.d, self.q)
    }
}

/// An unfitted ARIMA(p,d,q) model specification.
///
/// Create with [`ArimaSpec::new()`], adjust with the `with_*` builders and
/// call [`ArimaSpec::fit()`] to obtain a [`FittedModel`].
///
/// ```mermaid
/// graph LR
///     A["ArimaSpec::new(order)"] -->|".fit(&train)?"| B["FittedModel"]
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArimaSpec {
    order: ArimaOrder,
    include_mean: Option<bool>,
    max_iters: Option<u64>,
    tolerance: f64,
}

impl ArimaSpec {
    /// Floor of the default Nelder-Mead iteration limit.
    pub const MIN_DEFAULT_MAX_ITERS: u64 = 1000;
    /// Default iteration budget per estimated parameter.
    pub const ITERS_PER_PARAM: u64 = 500;
    /// Default Nelder-Mead tolerance on the simplex cost spread.
    pub const DEFAULT_TOLERANCE: f64 = 1e-8;

    /// Creates a specification with default estimation settings.
    ///
    /// # Example
    ///
    /// ```
    /// use nimbus_arima::{ArimaOrder, ArimaSpec};
    ///
    /// let spec = ArimaSpec::new(ArimaOrder::new(1, 1, 1)).with_max_iters(500);
    /// assert_eq!(spec.order().d(), 1);
    /// assert!(!spec.include_mean());
    /// ```
    pub fn new(order: ArimaOrder) -> Self {
        Self {
            order,
            include_mean: None,
            max_iters: None,
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }

    /// Forces the mean term on or off. By default it is estimated only
    /// when `d == 0`.
    pub fn with_mean(mut self, include: bool) -> Self {
        self.include_mean = Some(include);
        self
    }

    /// Sets the optimiser iteration limit, overriding the default that
    /// scales with the parameter count.
    pub fn with_max_iters(mut self, max_iters: u64) -> Self {
        self.max_iters = Some(max_iters);
        self
    }

    /// Sets the optimiser convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Returns the model order.
    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    /// Returns whether a mean term is estimated.
    pub fn include_mean(&self) -> bool {
        self.include_mean.unwrap_or(self.order.d == 0)
    }

    /// Returns the number of estimated ARMA and mean parameters.
    pub fn n_params(&self) -> usize {
        self.order.p + self.order.q + usize::from(self.include_mean())
    }

    /// Returns the optimiser iteration limit.
    ///
    /// Unless set explicitly this is [`ArimaSpec::ITERS_PER_PARAM`] per
    /// estimated parameter, but never below
    /// [`ArimaSpec::MIN_DEFAULT_MAX_ITERS`].
    pub fn max_iters(&self) -> u64 {
        self.max_iters.unwrap_or_else(|| {
            (Self::ITERS_PER_PARAM * self.n_params() as u64).max(Self::MIN_DEFAULT_MAX_ITERS)
        })
    }

    /// Returns the optimiser convergence tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Fits the model to `train` by exact Gaussian maximum likelihood.
    ///
    /// Hitting the iteration limit is not an error: the best model found is
    /// returned and [`FittedModel::convergence()`] records the shortfall.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ArimaError::InsufficientData`] | `train.len() < p + d + q + 1` |
    /// | [`ArimaError::ConstantData`] | the differenced series is constant |
    /// | [`ArimaError::InvalidArgument`] | zero `max_iters` or non-positive tolerance |
    /// | [`ArimaError::NonStationaryFit`] | estimated AR or MA roots on/inside the unit circle |
    /// | [`ArimaError::OptimizationFailed`] | the solver reports an error |
    pub fn fit(&self, train: &TimeSeries) -> Result<FittedModel, ArimaError> {
        crate::optimizer::fit_arima(self, train)
    }
}
