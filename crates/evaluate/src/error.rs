//! Evaluation error types.

use nimbus_calendar::YearMonth;

/// Errors that can occur during scoring.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluateError {
    /// Predicted and actual value slices disagree in length.
    #[error("{forecast} predicted values but {actual} actual values")]
    LengthMismatch { forecast: usize, actual: usize },

    /// Forecast and actual timestamps differ at some position. `None`
    /// marks the side that ran out of points first.
    #[error(
        "timestamp mismatch at index {index}: forecast {}, actual {}",
        show(forecast),
        show(actual)
    )]
    IndexMismatch {
        index: usize,
        forecast: Option<YearMonth>,
        actual: Option<YearMonth>,
    },

    /// Nothing to compare.
    #[error("cannot score an empty forecast")]
    Empty,
}

fn show(month: &Option<YearMonth>) -> String {
    month.map_or_else(|| "none".to_string(), |m| m.to_string())
}
