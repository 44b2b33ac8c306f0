//! ADF test results.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::Regression;

/// Conventional significance levels with tabulated critical values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Significance {
    /// 1%
    OnePercent,
    /// 5%
    FivePercent,
    /// 10%
    TenPercent,
}

impl Significance {
    /// Label used as the critical-value key, e.g. `"5%"`.
    pub fn label(self) -> &'static str {
        match self {
            Significance::OnePercent => "1%",
            Significance::FivePercent => "5%",
            Significance::TenPercent => "10%",
        }
    }

    /// Level as a probability.
    pub fn alpha(self) -> f64 {
        match self {
            Significance::OnePercent => 0.01,
            Significance::FivePercent => 0.05,
            Significance::TenPercent => 0.10,
        }
    }
}

/// Outcome of one ADF test. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StationarityReport {
    statistic: f64,
    p_value: f64,
    critical_values: BTreeMap<String, f64>,
    lags_used: usize,
    nobs: usize,
    regression: Regression,
}

impl StationarityReport {
    pub(crate) fn new(
        statistic: f64,
        p_value: f64,
        critical_values: BTreeMap<String, f64>,
        lags_used: usize,
        nobs: usize,
        regression: Regression,
    ) -> Self {
        Self {
            statistic,
            p_value,
            critical_values,
            lags_used,
            nobs,
            regression,
        }
    }

    /// t-statistic of the lagged level coefficient.
    pub fn statistic(&self) -> f64 {
        self.statistic
    }

    /// MacKinnon approximate p-value in `[0, 1]`.
    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    /// Critical values keyed by `"1%"`, `"5%"` and `"10%"`.
    pub fn critical_values(&self) -> &BTreeMap<String, f64> {
        &self.critical_values
    }

    /// Critical value at `level`.
    pub fn critical_value(&self, level: Significance) -> Option<f64> {
        self.critical_values.get(level.label()).copied()
    }

    /// Number of lagged differences in the final regression.
    pub fn lags_used(&self) -> usize {
        self.lags_used
    }

    /// Rows in the final regression.
    pub fn nobs(&self) -> usize {
        self.nobs
    }

    /// Deterministic terms used.
    pub fn regression(&self) -> Regression {
        self.regression
    }

    /// `true` when the unit-root null is rejected at `level`, i.e. the
    /// statistic lies below the critical value.
    pub fn is_stationary(&self, level: Significance) -> bool {
        self.critical_value(level)
            .is_some_and(|cv| self.statistic < cv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(statistic: f64) -> StationarityReport {
        let cv = BTreeMap::from([
            ("1%".to_string(), -3.5),
            ("5%".to_string(), -2.9),
            ("10%".to_string(), -2.6),
        ]);
        StationarityReport::new(statistic, 0.03, cv, 2, 97, Regression::Constant)
    }

    #[test]
    fn stationary_between_levels() {
        let r = report(-3.0);
        assert!(!r.is_stationary(Significance::OnePercent));
        assert!(r.is_stationary(Significance::FivePercent));
        assert!(r.is_stationary(Significance::TenPercent));
    }

    #[test]
    fn negative_infinity_is_stationary() {
        assert!(report(f64::NEG_INFINITY).is_stationary(Significance::OnePercent));
    }

    #[test]
    fn labels_and_alpha() {
        assert_eq!(Significance::FivePercent.label(), "5%");
        assert_eq!(Significance::TenPercent.alpha(), 0.10);
        assert_eq!(report(-1.0).critical_value(Significance::OnePercent), Some(-3.5));
    }
}
