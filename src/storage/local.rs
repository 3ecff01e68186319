//! Local filesystem storage implementation.
//!
//! Writes pretty-printed JSON below a root directory. Every file is written
//! to a temporary sibling first and renamed into place, so readers never see
//! a partially written file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{OutputConfig, PublishedIndex, StationInfo, StationResult};
use crate::storage::StationStorage;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    output: OutputConfig,
}

impl LocalStorage {
    /// Create a LocalStorage using the given output layout.
    pub fn new(output: OutputConfig) -> Self {
        Self { output }
    }

    /// Create a LocalStorage rooted at the given directory with the default layout.
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Self {
        Self::new(OutputConfig {
            root_dir: root_dir.into(),
            ..OutputConfig::default()
        })
    }

    pub fn root_dir(&self) -> &Path {
        &self.output.root_dir
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.output.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let written = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(bytes).await?;
            file.flush().await?;
            drop(file);
            tokio::fs::rename(&tmp, &path).await
        }
        .await;

        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(AppError::Io(e));
        }
        Ok(path)
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<PathBuf> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Load a previously published station file.
    pub async fn load_station(&self, station: &StationInfo) -> Result<Option<StationResult>> {
        self.read_json(&self.output.station_key(station)).await
    }

    /// Load the previously published index.
    pub async fn load_index(&self) -> Result<Option<PublishedIndex>> {
        self.read_json(&self.output.index_file).await
    }
}

#[async_trait]
impl StationStorage for LocalStorage {
    async fn write_station(
        &self,
        station: &StationInfo,
        result: &StationResult,
    ) -> Result<String> {
        let path = self
            .write_json(&self.output.station_key(station), result)
            .await?;
        Ok(path.display().to_string())
    }

    async fn write_index(&self, index: &PublishedIndex) -> Result<String> {
        let path = self.write_json(&self.output.index_file, index).await?;
        Ok(path.display().to_string())
    }
}
