//! Error types for the nimbus-stationarity crate.

/// Error type for all fallible operations in the nimbus-stationarity crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StationarityError {
    /// Returned when the series is shorter than the configured minimum.
    #[error("insufficient data for ADF test: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when the input contains NaN or infinite values.
    #[error("input contains a non-finite value at index {index}")]
    NonFiniteData {
        /// Index of the first offending value.
        index: usize,
    },

    /// Returned when the ADF regression matrix is singular.
    #[error("singular ADF regression ({n} observations, {regressors} regressors)")]
    SingularRegression {
        /// Rows in the regression.
        n: usize,
        /// Columns in the regression.
        regressors: usize,
    },

    /// Returned when a configuration value is out of range.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_insufficient_data() {
        let err = StationarityError::InsufficientData { n: 12, min: 20 };
        assert_eq!(
            err.to_string(),
            "insufficient data for ADF test: got 12 observations, need at least 20"
        );
    }

    #[test]
    fn display_singular() {
        let err = StationarityError::SingularRegression {
            n: 30,
            regressors: 4,
        };
        assert_eq!(
            err.to_string(),
            "singular ADF regression (30 observations, 4 regressors)"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<StationarityError>();
    }
}
