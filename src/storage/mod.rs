//! Storage abstractions for export persistence.
//!
//! A run produces two artifacts:
//!
//! ```text
//! conferences.csv   # deadline-sorted export, one row per record
//! failures.json     # fetches that produced no record (removed after a clean run)
//! ```

pub mod export;
pub mod local;

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{ConferenceRecord, FetchFailure};

// Re-export for convenience
pub use export::to_csv;
pub use local::LocalStorage;

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Number of records exported
    pub record_count: usize,
    /// Where the export landed
    pub location: PathBuf,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Trait for export storage backends.
#[async_trait]
pub trait ExportStorage: Send + Sync {
    /// Write the sorted records as CSV.
    async fn write_records(&self, records: &[ConferenceRecord]) -> Result<WriteMetadata>;

    /// Write the failure report. Returns its location, or `None` when
    /// there was nothing to report, in which case any earlier report is
    /// removed.
    async fn write_failures(&self, failures: &[FetchFailure]) -> Result<Option<PathBuf>>;
}
