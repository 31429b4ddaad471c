use crate::error::Result;
use crate::row::decode_rows;
use crate::types::CatalogRecord;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Bulk source of catalog snapshots. Each call returns a fresh, complete
/// record set; no filtering is pushed down.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_all_records(&self) -> Result<Vec<CatalogRecord>>;

    /// Short human-readable description for logs and health output
    fn describe(&self) -> String;
}

/// Fixed in-process record set
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<CatalogRecord>,
}

impl MemoryStore {
    #[must_use]
    pub const fn new(records: Vec<CatalogRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_all_records(&self) -> Result<Vec<CatalogRecord>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} records)", self.records.len())
    }
}

/// JSON array of [`crate::HostelRow`]s on disk, re-read on every fetch so edits to
/// the file show up without a restart.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn fetch_all_records(&self) -> Result<Vec<CatalogRecord>> {
        let bytes = tokio::fs::read(&self.path).await?;
        let rows = decode_rows(&bytes)?;
        log::debug!("Loaded {} rows from {}", rows.len(), self.path.display());
        Ok(rows.into_iter().map(CatalogRecord::from).collect())
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
