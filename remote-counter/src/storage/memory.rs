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

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::common::CounterId;
use crate::storage::{CounterRecord, StorageError};
use crate::traits::{SharedStorage, StorageProvider};

/// In-memory storage keyed by counter identity.
///
/// Records survive actor eviction and reactivation but not the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: DashMap<CounterId, CounterRecord>,
}

impl MemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store behind the shared trait object actors use.
    #[must_use]
    pub fn shared() -> SharedStorage {
        Arc::new(Self::new())
    }

    /// Number of identities with a stored record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl StorageProvider for MemoryStorage {
    async fn load(&self, id: &CounterId) -> Result<Option<CounterRecord>, StorageError> {
        Ok(self.records.get(id).map(|entry| *entry.value()))
    }

    async fn save(&self, id: &CounterId, record: &CounterRecord) -> Result<(), StorageError> {
        self.records.insert(id.clone(), *record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[tokio::test]
    async fn missing_record_loads_as_none() {
        let storage = MemoryStorage::new();
        let id = CounterId::derive("test", "nothing-here");
        assert_eq!(storage.load(&id).await, Ok(None));
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn save_replaces_previous_record() {
        let storage = MemoryStorage::new();
        let id = CounterId::derive("test", "demo");
        storage.save(&id, &CounterRecord::new(1, Utc::now())).await.unwrap();
        storage.save(&id, &CounterRecord::new(2, Utc::now())).await.unwrap();
        assert_eq!(storage.load(&id).await.unwrap().map(|r| r.value), Some(2));
        assert_eq!(storage.len(), 1);
    }
}
