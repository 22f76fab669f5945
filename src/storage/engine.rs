//! Reading Store
//!
//! Append-only collection of readings owned by the API server.
//! - Write path: validate → append in memory → rewrite JSON snapshot
//! - Read path: clone of the current list
//!
//! Thread-safe via Tokio's async RwLock for concurrent access.

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::types::Reading;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Configuration for the reading store
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Root directory for the snapshot file
    pub data_dir: PathBuf,
    /// Persist readings to `readings.json` after every append
    pub persist: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("hydromonitor_data"),
            persist: true,
        }
    }
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Config that never touches the filesystem
    pub fn in_memory() -> Self {
        Self {
            persist: false,
            ..Default::default()
        }
    }

    /// Get path to the snapshot file
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join("readings.json")
    }
}

/// Append-only reading store
#[derive(Debug)]
pub struct ReadingStore {
    readings: RwLock<Vec<Reading>>,
    snapshot_path: Option<PathBuf>,
}

impl ReadingStore {
    /// Open the store, loading the snapshot if persistence is enabled
    pub async fn open(config: &StorageConfig) -> StorageResult<Self> {
        if !config.persist {
            return Ok(Self::in_memory());
        }

        let path = config.snapshot_path();
        let readings = load_snapshot(&path).await?;

        tracing::info!(
            path = %path.display(),
            readings = readings.len(),
            "Opened reading store"
        );

        Ok(Self {
            readings: RwLock::new(readings),
            snapshot_path: Some(path),
        })
    }

    /// Store without a snapshot file
    pub fn in_memory() -> Self {
        Self {
            readings: RwLock::new(Vec::new()),
            snapshot_path: None,
        }
    }

    /// All readings in insertion order
    pub async fn list(&self) -> Vec<Reading> {
        self.readings.read().await.clone()
    }

    /// Number of stored readings
    pub async fn len(&self) -> usize {
        self.readings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.readings.read().await.is_empty()
    }

    /// Append a batch of readings, returning how many were stored
    ///
    /// The batch is all-or-nothing: a non-finite value anywhere rejects it.
    pub async fn append(&self, batch: Vec<Reading>) -> StorageResult<usize> {
        if let Some(bad) = batch.iter().find(|r| !r.is_finite()) {
            return Err(StorageError::InvalidReading(format!(
                "reading {} contains a non-finite value",
                bad.id
            )));
        }

        let count = batch.len();
        let mut readings = self.readings.write().await;
        readings.extend(batch);

        if let Some(path) = &self.snapshot_path {
            if let Err(e) = save_snapshot(path, &readings).await {
                // Keep memory and file in agreement.
                let keep = readings.len() - count;
                readings.truncate(keep);
                return Err(e);
            }
        }

        tracing::debug!(appended = count, total = readings.len(), "Appended readings");
        Ok(count)
    }
}

async fn load_snapshot(path: &Path) -> StorageResult<Vec<Reading>> {
    if !tokio::fs::try_exists(path).await? {
        return Ok(Vec::new());
    }

    let content = tokio::fs::read_to_string(path).await?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content).map_err(|e| {
        StorageError::Corruption(format!("{}: {}", path.display(), e))
    })
}

async fn save_snapshot(path: &Path, readings: &[Reading]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let content = serde_json::to_string_pretty(readings)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, content).await?;
    tokio::fs::rename(&tmp, path).await?;

    Ok(())
}
