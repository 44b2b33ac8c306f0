//! Destinations for [`ModelRecord`]s.

use crate::record::ModelRecord;

/// Boxed error returned by sink implementations.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Accepts one record per completed run.
///
/// Implementations own their storage lifecycle: whatever they open for a
/// write must be released before `write` returns, on success or failure.
pub trait ResultsSink {
    fn write(&mut self, record: &ModelRecord) -> Result<(), SinkError>;
}

/// Keeps records in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    records: Vec<ModelRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records written so far, oldest first.
    pub fn records(&self) -> &[ModelRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ModelRecord> {
        self.records
    }
}

impl ResultsSink for MemorySink {
    fn write(&mut self, record: &ModelRecord) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }
}
