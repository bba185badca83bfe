/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace};

use crate::common::CounterId;
use crate::storage::{CounterRecord, StorageError};
use crate::traits::StorageProvider;

/// Stores each counter as `<identity>.json` inside a directory.
///
/// Saves write and sync a sibling temporary file, rename it over the record
/// and sync the directory, so a save that returned `Ok` survives a crash and
/// a failed save leaves the previous record readable.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Opens (and creates if needed) the storage directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            StorageError::Io(format!(
                "Failed to create storage directory {}: {}",
                root.display(),
                e
            ))
        })?;
        debug!("File storage opened at: {}", root.display());
        Ok(Self { root })
    }

    /// The directory records are kept in.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, id: &CounterId) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }
}

#[async_trait]
impl StorageProvider for FileStorage {
    async fn load(&self, id: &CounterId) -> Result<Option<CounterRecord>, StorageError> {
        let path = self.record_path(id);
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                trace!("Loaded record from {}", path.display());
                Ok(Some(serde_json::from_slice(&bytes)?))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn save(&self, id: &CounterId, record: &CounterRecord) -> Result<(), StorageError> {
        let path = self.record_path(id);
        let staging = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec(record)?;
        write_synced(&staging, &bytes).await.map_err(|e| {
            StorageError::Io(format!("Failed to write {}: {}", staging.display(), e))
        })?;
        tokio::fs::rename(&staging, &path).await.map_err(|e| {
            StorageError::Io(format!("Failed to replace {}: {}", path.display(), e))
        })?;
        sync_directory(&self.root).await.map_err(|e| {
            StorageError::Io(format!("Failed to sync {}: {}", self.root.display(), e))
        })?;
        trace!("Saved value {} to {}", record.value, path.display());
        Ok(())
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

// makes the rename itself durable
#[cfg(unix)]
async fn sync_directory(dir: &Path) -> std::io::Result<()> {
    File::open(dir).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_directory(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}
