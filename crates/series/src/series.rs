//! Timestamped monthly series.

use nimbus_calendar::{YearMonth, month_sequence};
use serde::Serialize;

use crate::difference::difference;
use crate::error::SeriesError;

/// An ordered sequence of `(month, value)` observations.
///
/// Invariants, checked on construction: timestamps strictly increase and
/// every value is finite. Missing observations must be dropped before a
/// series is built. Gaps in the monthly cadence are allowed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimeSeries {
    timestamps: Vec<YearMonth>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Builds a series from parallel timestamp and value vectors.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SeriesError::LengthMismatch`] | vectors differ in length |
    /// | [`SeriesError::NonIncreasingTimestamps`] | a timestamp does not follow its predecessor |
    /// | [`SeriesError::NonFiniteValue`] | a value is NaN or infinite |
    pub fn new(timestamps: Vec<YearMonth>, values: Vec<f64>) -> Result<Self, SeriesError> {
        if timestamps.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                timestamps: timestamps.len(),
                values: values.len(),
            });
        }
        for (i, w) in timestamps.windows(2).enumerate() {
            if w[1] <= w[0] {
                return Err(SeriesError::NonIncreasingTimestamps {
                    index: i + 1,
                    previous: w[0],
                    current: w[1],
                });
            }
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(SeriesError::NonFiniteValue { index });
        }
        Ok(Self { timestamps, values })
    }

    /// Builds a gap-free monthly series starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::NonFiniteValue`] if any value is not finite.
    pub fn monthly(start: YearMonth, values: Vec<f64>) -> Result<Self, SeriesError> {
        let timestamps = month_sequence(start, values.len());
        Self::new(timestamps, values)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Observation timestamps.
    pub fn timestamps(&self) -> &[YearMonth] {
        &self.timestamps
    }

    /// Observation values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First timestamp, if any.
    pub fn start(&self) -> Option<YearMonth> {
        self.timestamps.first().copied()
    }

    /// Last timestamp, if any.
    pub fn end(&self) -> Option<YearMonth> {
        self.timestamps.last().copied()
    }

    /// Iterates over `(timestamp, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (YearMonth, f64)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Splits into `[0, at)` and `[at, len)`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::InvalidArgument`] if `at > len`.
    pub fn split_at(&self, at: usize) -> Result<(TimeSeries, TimeSeries), SeriesError> {
        if at > self.len() {
            return Err(SeriesError::InvalidArgument {
                name: "at",
                reason: format!("split index {at} exceeds series length {}", self.len()),
            });
        }
        let head = TimeSeries {
            timestamps: self.timestamps[..at].to_vec(),
            values: self.values[..at].to_vec(),
        };
        let tail = TimeSeries {
            timestamps: self.timestamps[at..].to_vec(),
            values: self.values[at..].to_vec(),
        };
        Ok((head, tail))
    }

    /// Differences the values `d` times; the first `d` timestamps are dropped
    /// so each difference carries the timestamp of its later observation.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::EmptySeries`] if `len < d + 1`.
    pub fn difference(&self, d: usize) -> Result<TimeSeries, SeriesError> {
        let values = difference(&self.values, d)?;
        Ok(TimeSeries {
            timestamps: self.timestamps[d..].to_vec(),
            values,
        })
    }
}

/// Splits `series` into training and test parts, the training part holding
/// `floor(len * train_fraction)` observations.
///
/// # Errors
///
/// Returns [`SeriesError::InvalidArgument`] if `train_fraction` is not in
/// `(0, 1)` or either part would be empty.
pub fn split_train_test(
    series: &TimeSeries,
    train_fraction: f64,
) -> Result<(TimeSeries, TimeSeries), SeriesError> {
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        return Err(SeriesError::InvalidArgument {
            name: "train_fraction",
            reason: format!("{train_fraction} is not in (0, 1)"),
        });
    }
    let train_size = (series.len() as f64 * train_fraction).floor() as usize;
    if train_size == 0 || train_size == series.len() {
        return Err(SeriesError::InvalidArgument {
            name: "train_fraction",
            reason: format!(
                "{train_fraction} of {} observations leaves an empty train or test part",
                series.len()
            ),
        });
    }
    series.split_at(train_size)
}
