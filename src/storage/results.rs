//! Result artifact storage

use super::tabular::write_records;
use crate::core::models::{Record, RecordStatus};
use crate::utils::error::{CheckerError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

static ARTIFACT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(success|fail)_[A-Za-z0-9_]+\.csv$").expect("Invalid artifact name regex")
});

/// Outcome partition of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Succeeded,
    Failed,
}

impl Partition {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Succeeded => "success",
            Self::Failed => "fail",
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::Succeeded => record.status == RecordStatus::Succeeded,
            Self::Failed => record.status == RecordStatus::Failed,
        }
    }
}

/// Check that `name` is an artifact name this service could have produced
pub fn validate_artifact_name(name: &str) -> Result<()> {
    if ARTIFACT_NAME.is_match(name) {
        Ok(())
    } else {
        Err(CheckerError::bad_request(format!(
            "Invalid result file name: {}",
            name
        )))
    }
}

/// Persistence of result partitions
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Write the records of `partition` and return the artifact name
    ///
    /// Records outside the partition are ignored; an empty partition still
    /// produces a header-only artifact.
    async fn write_result_file(&self, records: &[Record], partition: Partition) -> Result<String>;

    /// Raw bytes of a previously written artifact
    async fn read_artifact(&self, name: &str) -> Result<Vec<u8>>;
}

/// Stores artifacts as CSV files in one directory
#[derive(Debug, Clone)]
pub struct LocalResultStore {
    base_path: PathBuf,
}

impl LocalResultStore {
    /// Open the store, creating the directory if needed
    pub async fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let path = base_path.as_ref().to_path_buf();

        if !path.exists() {
            fs::create_dir_all(&path).await.map_err(|e| {
                CheckerError::file_storage(format!("Failed to create results directory: {}", e))
            })?;
        }

        info!("Result storage initialized at: {}", path.display());
        Ok(Self { base_path: path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn artifact_name(partition: Partition) -> String {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let token = Uuid::new_v4().simple().to_string();
        format!("{}_{}_{}.csv", partition.prefix(), timestamp, &token[..8])
    }
}

#[async_trait]
impl ResultStore for LocalResultStore {
    async fn write_result_file(&self, records: &[Record], partition: Partition) -> Result<String> {
        let selected: Vec<Record> = records
            .iter()
            .filter(|r| partition.matches(r))
            .cloned()
            .collect();

        let name = Self::artifact_name(partition);
        let content = write_records(&selected);

        fs::write(self.base_path.join(&name), content.as_bytes())
            .await
            .map_err(|e| CheckerError::file_storage(format!("Failed to write {}: {}", name, e)))?;

        debug!("Wrote {} records to {}", selected.len(), name);
        Ok(name)
    }

    async fn read_artifact(&self, name: &str) -> Result<Vec<u8>> {
        validate_artifact_name(name)?;

        let path = self.base_path.join(name);
        if !path.exists() {
            return Err(CheckerError::not_found(format!("File not found: {}", name)));
        }

        fs::read(&path)
            .await
            .map_err(|e| CheckerError::file_storage(format!("Failed to read {}: {}", name, e)))
    }
}
