//! Error types for the nimbus-calendar crate.

/// Error type for all fallible operations in the nimbus-calendar crate.
///
/// Covers month-number validation and the textual timestamp formats
/// accepted by [`YearMonth::parse`](crate::YearMonth::parse).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a timestamp string is not `YYYY-MM` or `YYYY-MM-DD`.
    #[error("invalid timestamp {input:?}: expected YYYY-MM or YYYY-MM-DD")]
    InvalidFormat {
        /// The text that failed to parse.
        input: String,
    },
}
