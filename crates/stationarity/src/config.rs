//! ADF test configuration.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::adf;
use crate::error::StationarityError;
use crate::report::StationarityReport;

/// Deterministic terms included in the test regression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Regression {
    /// No constant, no trend (`"n"`).
    #[serde(rename = "n")]
    None,
    /// Constant only (`"c"`).
    #[default]
    #[serde(rename = "c")]
    Constant,
    /// Constant and linear trend (`"ct"`).
    #[serde(rename = "ct")]
    ConstantTrend,
}

impl Regression {
    /// Number of deterministic regressors.
    pub fn n_trend(self) -> usize {
        match self {
            Regression::None => 0,
            Regression::Constant => 1,
            Regression::ConstantTrend => 2,
        }
    }

    /// Short code used in configuration files and reports.
    pub fn code(self) -> &'static str {
        match self {
            Regression::None => "n",
            Regression::Constant => "c",
            Regression::ConstantTrend => "ct",
        }
    }
}

impl fmt::Display for Regression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Regression {
    type Err = StationarityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" => Ok(Regression::None),
            "c" => Ok(Regression::Constant),
            "ct" => Ok(Regression::ConstantTrend),
            other => Err(StationarityError::InvalidArgument {
                name: "regression",
                reason: format!("unknown regression {other:?}, expected one of n, c, ct"),
            }),
        }
    }
}

/// How the number of lagged differences is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Autolag {
    /// Minimise AIC over `0..=max_lags` on a common sample.
    #[default]
    Aic,
    /// Use exactly `max_lags` lagged differences.
    Fixed,
}

/// Configuration for the ADF test.
///
/// ```
/// use nimbus_stationarity::{AdfConfig, Regression};
///
/// let config = AdfConfig::new()
///     .with_regression(Regression::ConstantTrend)
///     .with_max_lags(4);
/// assert_eq!(config.max_lags(), Some(4));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AdfConfig {
    regression: Regression,
    autolag: Autolag,
    max_lags: Option<usize>,
    min_obs: usize,
}

impl Default for AdfConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AdfConfig {
    /// Default minimum series length.
    pub const DEFAULT_MIN_OBS: usize = 20;

    /// Constant-only regression, AIC lag selection, Schwert default
    /// maximum lag, minimum length 20.
    pub fn new() -> Self {
        Self {
            regression: Regression::Constant,
            autolag: Autolag::Aic,
            max_lags: None,
            min_obs: Self::DEFAULT_MIN_OBS,
        }
    }

    /// Sets the deterministic terms.
    pub fn with_regression(mut self, regression: Regression) -> Self {
        self.regression = regression;
        self
    }

    /// Sets the lag selection method.
    pub fn with_autolag(mut self, autolag: Autolag) -> Self {
        self.autolag = autolag;
        self
    }

    /// Sets the maximum number of lagged differences.
    pub fn with_max_lags(mut self, max_lags: usize) -> Self {
        self.max_lags = Some(max_lags);
        self
    }

    /// Sets the minimum accepted series length.
    pub fn with_min_obs(mut self, min_obs: usize) -> Self {
        self.min_obs = min_obs;
        self
    }

    /// Returns the deterministic terms.
    pub fn regression(&self) -> Regression {
        self.regression
    }

    /// Returns the lag selection method.
    pub fn autolag(&self) -> Autolag {
        self.autolag
    }

    /// Returns the explicit maximum lag, if set.
    pub fn max_lags(&self) -> Option<usize> {
        self.max_lags
    }

    /// Returns the minimum accepted series length.
    pub fn min_obs(&self) -> usize {
        self.min_obs
    }

    /// Runs the test on `values`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`StationarityError::InsufficientData`] | fewer than `min_obs` values, or too few to fit one lag |
    /// | [`StationarityError::NonFiniteData`] | a value is NaN or infinite |
    /// | [`StationarityError::InvalidArgument`] | `max_lags` exceeds what the sample supports |
    /// | [`StationarityError::SingularRegression`] | the regressors are collinear |
    pub fn test(&self, values: &[f64]) -> Result<StationarityReport, StationarityError> {
        adf::adf_test(values, self)
    }
}
