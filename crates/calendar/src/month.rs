//! Year-month timestamp.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CalendarError;

/// A calendar month with year context, the cadence of monthly series.
///
/// Ordering is chronological. Displays and serializes as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl YearMonth {
    /// Creates a new `YearMonth`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
    pub fn new(year: i32, month: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        Ok(Self { year, month })
    }

    /// Parses `YYYY-MM` or `YYYY-MM-DD`; the day, when present, is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidFormat`] for any other shape and
    /// [`CalendarError::InvalidMonth`] for a month outside 1..=12.
    pub fn parse(input: &str) -> Result<Self, CalendarError> {
        let invalid = || CalendarError::InvalidFormat {
            input: input.to_string(),
        };
        let trimmed = input.trim();
        let mut parts = trimmed.split('-');
        let year_str = parts.next().ok_or_else(invalid)?;
        let month_str = parts.next().ok_or_else(invalid)?;
        let day_str = parts.next();
        if parts.next().is_some() {
            return Err(invalid());
        }

        if year_str.len() != 4 || month_str.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year_str.parse().map_err(|_| invalid())?;
        let month: u8 = month_str.parse().map_err(|_| invalid())?;
        if let Some(day_str) = day_str {
            let day: u8 = day_str.parse().map_err(|_| invalid())?;
            if day_str.len() != 2 || !(1..=31).contains(&day) {
                return Err(invalid());
            }
        }
        Self::new(year, month)
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Months elapsed since January of year 0.
    fn ordinal(self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    fn from_ordinal(ordinal: i64) -> Self {
        let year = ordinal.div_euclid(12) as i32;
        let month = (ordinal.rem_euclid(12) + 1) as u8;
        Self { year, month }
    }

    /// Returns the following month; December wraps to January of the next year.
    pub fn next(self) -> Self {
        self.offset(1)
    }

    /// Returns the month `months` steps away (negative steps go back in time).
    pub fn offset(self, months: i64) -> Self {
        Self::from_ordinal(self.ordinal() + months)
    }

    /// Signed number of months from `self` to `later`.
    pub fn months_until(self, later: YearMonth) -> i64 {
        later.ordinal() - self.ordinal()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        YearMonth::parse(&s).map_err(serde::de::Error::custom)
    }
}
