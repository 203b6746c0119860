//! Local filesystem storage implementation.
//!
//! Files are written atomically: content goes to a sibling `<name>.tmp` file
//! that is then renamed over the destination, so an interrupted run never leaves
//! a truncated export behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::{ConferenceRecord, FetchFailure, OutputConfig};
use crate::storage::{ExportStorage, WriteMetadata, to_csv};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    csv_path: PathBuf,
    failures_path: PathBuf,
}

impl LocalStorage {
    /// Create a LocalStorage writing to the given destinations.
    pub fn new(csv_path: impl Into<PathBuf>, failures_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            failures_path: failures_path.into(),
        }
    }

    /// Create a LocalStorage from the `[output]` config section.
    pub fn from_config(output: &OutputConfig) -> Self {
        Self::new(&output.path, &output.failures_path)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// Sibling temp file named after the full file name (`out.csv.tmp`).
    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        path.with_file_name(name)
    }

    /// Remove a file, treating a missing file as already removed.
    async fn remove_if_exists(path: &Path) -> Result<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
        Self::ensure_dir(path).await?;

        let tmp = Self::temp_path(path);
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl ExportStorage for LocalStorage {
    async fn write_records(&self, records: &[ConferenceRecord]) -> Result<WriteMetadata> {
        let bytes = to_csv(records)?;
        Self::write_bytes(&self.csv_path, &bytes).await?;

        log::debug!(
            "Wrote {} bytes to {}",
            bytes.len(),
            self.csv_path.display()
        );

        Ok(WriteMetadata {
            record_count: records.len(),
            location: self.csv_path.clone(),
            timestamp: Utc::now(),
        })
    }

    async fn write_failures(&self, failures: &[FetchFailure]) -> Result<Option<PathBuf>> {
        if failures.is_empty() {
            // a stale report from an earlier run must not outlive a clean one
            Self::remove_if_exists(&self.failures_path).await?;
            return Ok(None);
        }
        let bytes = serde_json::to_vec_pretty(failures)?;
        Self::write_bytes(&self.failures_path, &bytes).await?;
        Ok(Some(self.failures_path.clone()))
    }
}
