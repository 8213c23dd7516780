//! Recording audit sink.

use std::sync::Mutex;

use questline_engine::application::audit::{AuditKind, AuditRecord, AuditSink};

/// An audit sink that records everything for later assertions.
#[derive(Debug, Default)]
pub struct RecordingAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl RecordingAuditSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All records so far.
    #[must_use]
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().expect("audit mutex poisoned").clone()
    }

    /// Number of records of one kind.
    #[must_use]
    pub fn count_of(&self, kind: AuditKind) -> usize {
        self.records
            .lock()
            .expect("audit mutex poisoned")
            .iter()
            .filter(|record| record.kind == kind)
            .count()
    }
}

impl AuditSink for RecordingAuditSink {
    fn record(&self, record: AuditRecord) {
        self.records.lock().expect("audit mutex poisoned").push(record);
    }
}
