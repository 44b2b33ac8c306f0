//! Append-only CSV table of pipeline results.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use nimbus_pipeline::{ModelRecord, ResultsSink, SinkError};
use tracing::debug;

use crate::error::IoError;

/// Header of the results table: an `id` followed by the [`ModelRecord`]
/// fields in declaration order.
pub const RESULT_COLUMNS: [&str; 17] = [
    "id",
    "adf_stat",
    "adf_pvalue",
    "adf_stat_diff",
    "adf_pvalue_diff",
    "order_p",
    "order_d",
    "order_q",
    "forecast_steps",
    "model_summary",
    "mse",
    "mae",
    "city",
    "train_start",
    "train_end",
    "test_start",
    "test_end",
];

/// The `arima_model` results table kept as a CSV file.
///
/// Every call opens the file, writes and drops the handle before
/// returning. Ids start at 1 and increase by one per appended row.
#[derive(Debug, Clone)]
pub struct CsvResultsStore {
    path: PathBuf,
}

impl CsvResultsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `record` and returns the id assigned to it. The header is
    /// written when the file is new or empty.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Io`] or [`IoError::Csv`] if the table cannot be
    /// read or written.
    pub fn append(&self, record: &ModelRecord) -> Result<u64, IoError> {
        let rows = self.records()?;
        let id = rows.last().map_or(1, |(last, _)| last + 1);
        let needs_header = rows.is_empty() && self.is_empty_file()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer
                .write_record(RESULT_COLUMNS)
                .map_err(|e| self.csv_error(e))?;
        }
        writer
            .write_record(row(id, record))
            .map_err(|e| self.csv_error(e))?;
        writer.flush().map_err(|source| self.io_error(source))?;
        debug!(id, path = %self.path.display(), "appended model record");
        Ok(id)
    }

    /// Reads every stored row with its id, in file order. A missing file
    /// reads as an empty table.
    pub fn records(&self) -> Result<Vec<(u64, ModelRecord)>, IoError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| self.csv_error(e))?;
        let mut rows = Vec::new();
        for result in reader.records() {
            let raw = result.map_err(|e| self.csv_error(e))?;
            let line = raw.position().map_or(0, |p| p.line());
            let id: u64 = raw
                .get(0)
                .unwrap_or_default()
                .parse()
                .map_err(|_| IoError::InvalidRow {
                    line,
                    reason: "id is not an integer".to_string(),
                })?;
            let fields: csv::StringRecord = raw.iter().skip(1).collect();
            let record: ModelRecord =
                fields
                    .deserialize(None)
                    .map_err(|e| IoError::InvalidRow {
                        line,
                        reason: e.to_string(),
                    })?;
            rows.push((id, record));
        }
        Ok(rows)
    }

    fn is_empty_file(&self) -> Result<bool, IoError> {
        match std::fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() == 0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> IoError {
        IoError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_error(&self, e: csv::Error) -> IoError {
        IoError::Csv {
            path: self.path.clone(),
            reason: e.to_string(),
        }
    }
}

impl ResultsSink for CsvResultsStore {
    fn write(&mut self, record: &ModelRecord) -> Result<(), SinkError> {
        self.append(record)?;
        Ok(())
    }
}

fn row(id: u64, r: &ModelRecord) -> Vec<String> {
    vec![
        id.to_string(),
        r.adf_stat.to_string(),
        r.adf_pvalue.to_string(),
        r.adf_stat_diff.to_string(),
        r.adf_pvalue_diff.to_string(),
        r.order_p.to_string(),
        r.order_d.to_string(),
        r.order_q.to_string(),
        r.forecast_steps.to_string(),
        r.model_summary.clone(),
        r.mse.to_string(),
        r.mae.to_string(),
        r.city.clone(),
        r.train_start.clone(),
        r.train_end.clone(),
        r.test_start.clone(),
        r.test_end.clone(),
    ]
}
