//! City temperature reader for the Berkeley Earth major-city CSV layout.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use nimbus_calendar::YearMonth;
use nimbus_series::TimeSeries;
use tracing::{debug, info};

use crate::error::IoError;

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Selects one city and an inclusive month range from a temperature CSV.
///
/// Column names default to the `GlobalLandTemperaturesByMajorCity.csv`
/// header (`dt`, `AverageTemperature`, `City`); the `with_*` builders
/// override them for files with a different header.
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderConfig {
    city: String,
    start: Option<YearMonth>,
    end: Option<YearMonth>,
    date_column: String,
    value_column: String,
    city_column: String,
}

impl ReaderConfig {
    /// Reads every month recorded for `city`.
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            start: None,
            end: None,
            date_column: "dt".into(),
            value_column: "AverageTemperature".into(),
            city_column: "City".into(),
        }
    }

    /// Keeps only months at or after `start`.
    pub fn with_start(mut self, start: YearMonth) -> Self {
        self.start = Some(start);
        self
    }

    /// Keeps only months at or before `end`.
    pub fn with_end(mut self, end: YearMonth) -> Self {
        self.end = Some(end);
        self
    }

    /// Set the timestamp column name.
    pub fn with_date_column(mut self, name: impl Into<String>) -> Self {
        self.date_column = name.into();
        self
    }

    /// Set the temperature column name.
    pub fn with_value_column(mut self, name: impl Into<String>) -> Self {
        self.value_column = name.into();
        self
    }

    /// Set the city column name.
    pub fn with_city_column(mut self, name: impl Into<String>) -> Self {
        self.city_column = name.into();
        self
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn start(&self) -> Option<YearMonth> {
        self.start
    }

    pub fn end(&self) -> Option<YearMonth> {
        self.end
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every problem found.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut problems = Vec::new();
        if self.city.trim().is_empty() {
            problems.push("city must not be empty".to_string());
        }
        if let (Some(start), Some(end)) = (self.start, self.end)
            && start > end
        {
            problems.push(format!("start {start} is after end {end}"));
        }
        for (label, name) in [
            ("date", &self.date_column),
            ("value", &self.value_column),
            ("city", &self.city_column),
        ] {
            if name.is_empty() {
                problems.push(format!("{label} column name must not be empty"));
            }
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: problems.len(),
                details: problems.join("; "),
            })
        }
    }

    fn in_range(&self, month: YearMonth) -> bool {
        self.start.is_none_or(|s| month >= s) && self.end.is_none_or(|e| month <= e)
    }
}

// ---------------------------------------------------------------------------
// read_city_series
// ---------------------------------------------------------------------------

/// Reads one city's monthly temperatures into a [`TimeSeries`].
///
/// Rows for other cities and months outside the configured range are
/// skipped. Rows with an empty or non-finite temperature are dropped, so the
/// result may have gaps in its monthly cadence.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`IoError::FileNotFound`] | `path` does not exist |
/// | [`IoError::MissingColumn`] | a configured column is absent from the header |
/// | [`IoError::InvalidRow`] | unparseable timestamp or temperature |
/// | [`IoError::DuplicateTimestamp`] | a month appears twice for the city |
/// | [`IoError::DecreasingTimestamps`] | rows for the city go back in time |
/// | [`IoError::NoData`] | nothing usable remains after filtering |
pub fn read_city_series(path: &Path, config: &ReaderConfig) -> Result<TimeSeries, IoError> {
    config.validate()?;
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| IoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| IoError::MissingColumn {
                name: name.to_string(),
                path: path.to_path_buf(),
            })
    };
    let date_idx = column(&config.date_column)?;
    let value_idx = column(&config.value_column)?;
    let city_idx = column(&config.city_column)?;

    let mut months: Vec<YearMonth> = Vec::new();
    let mut values = Vec::new();
    let mut dropped = 0usize;

    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        if record.get(city_idx) != Some(config.city.as_str()) {
            continue;
        }
        let line = record.position().map_or(0, |p| p.line());

        let raw_date = record.get(date_idx).unwrap_or_default();
        let month = YearMonth::parse(raw_date).map_err(|e| IoError::InvalidRow {
            line,
            reason: e.to_string(),
        })?;
        if !config.in_range(month) {
            continue;
        }

        let raw_value = record.get(value_idx).unwrap_or_default();
        let value = match parse_temperature(raw_value) {
            Ok(Some(v)) => v,
            Ok(None) => {
                dropped += 1;
                continue;
            }
            Err(reason) => return Err(IoError::InvalidRow { line, reason }),
        };

        if let Some(&previous) = months.last() {
            if month == previous {
                return Err(IoError::DuplicateTimestamp {
                    city: config.city.clone(),
                    month,
                });
            }
            if month < previous {
                return Err(IoError::DecreasingTimestamps {
                    city: config.city.clone(),
                    previous,
                    current: month,
                });
            }
        }
        months.push(month);
        values.push(value);
    }

    if months.is_empty() {
        return Err(IoError::NoData {
            city: config.city.clone(),
            path: path.to_path_buf(),
        });
    }
    debug!(dropped, "dropped rows with missing temperature");
    info!(
        city = %config.city,
        n = months.len(),
        first = %months[0],
        "read city series"
    );
    Ok(TimeSeries::new(months, values)?)
}

/// `Ok(None)` marks a missing reading.
fn parse_temperature(raw: &str) -> Result<Option<f64>, String> {
    if raw.is_empty() {
        return Ok(None);
    }
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("invalid temperature {raw:?}"))?;
    Ok(value.is_finite().then_some(value))
}

fn csv_error(path: &Path, e: csv::Error) -> IoError {
    IoError::Csv {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}
