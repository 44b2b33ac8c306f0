//! Error types for the nimbus-series crate.

use nimbus_calendar::YearMonth;

/// Error type for all fallible operations in the nimbus-series crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when differencing is requested beyond the available length.
    #[error("cannot difference {n} observations {d} time(s): need at least {}", d + 1)]
    EmptySeries {
        /// Number of observations provided.
        n: usize,
        /// Differencing order requested.
        d: usize,
    },

    /// Returned when timestamps and values have different lengths.
    #[error("length mismatch: {timestamps} timestamps vs {values} values")]
    LengthMismatch {
        /// Number of timestamps.
        timestamps: usize,
        /// Number of values.
        values: usize,
    },

    /// Returned when a timestamp does not strictly follow its predecessor.
    #[error("timestamps must be strictly increasing: {current} at index {index} follows {previous}")]
    NonIncreasingTimestamps {
        /// Index of the offending timestamp.
        index: usize,
        /// Timestamp at `index - 1`.
        previous: YearMonth,
        /// Timestamp at `index`.
        current: YearMonth,
    },

    /// Returned when a value is NaN or infinite.
    #[error("non-finite value at index {index}")]
    NonFiniteValue {
        /// Index of the offending value.
        index: usize,
    },

    /// Returned when an argument is outside its valid domain.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
