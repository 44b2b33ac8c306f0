//! Error types for nimbus-io.

use std::path::PathBuf;

use nimbus_calendar::YearMonth;

/// Error type for all fallible operations in the nimbus-io crate.
///
/// Covers file access, CSV and JSON encoding failures, malformed input rows,
/// and ordering problems found while assembling a city's series.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an operating-system I/O failure.
    #[error("i/o error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wraps an error originating from the csv crate.
    #[error("csv error in {}: {reason}", path.display())]
    Csv {
        path: PathBuf,
        reason: String,
    },

    /// Wraps an error originating from serde_json.
    #[error("json error in {}: {reason}", path.display())]
    Json {
        path: PathBuf,
        reason: String,
    },

    /// Returned when a required column is not in the CSV header.
    #[error("column '{name}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a data row cannot be interpreted.
    #[error("line {line}: {reason}")]
    InvalidRow {
        /// 1-based line number in the file.
        line: u64,
        /// What was wrong with the row.
        reason: String,
    },

    /// Returned when the same month appears twice for one city.
    #[error("duplicate timestamp {month} for city '{city}'")]
    DuplicateTimestamp { city: String, month: YearMonth },

    /// Returned when a city's rows are not in chronological order.
    #[error("timestamps for city '{city}' decrease: {current} follows {previous}")]
    DecreasingTimestamps {
        city: String,
        previous: YearMonth,
        current: YearMonth,
    },

    /// Returned when no usable rows match the reader configuration.
    #[error("no temperature data for city '{city}' in {}", path.display())]
    NoData { city: String, path: PathBuf },

    /// Returned when a configuration check fails.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Wraps a failure assembling the [`TimeSeries`](nimbus_series::TimeSeries).
    #[error(transparent)]
    Series(#[from] nimbus_series::SeriesError),
}
