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

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::common::CounterId;
use crate::storage::{CounterRecord, StorageError};

/// Storage handle shared by the registry and every actor it activates.
pub type SharedStorage = Arc<dyn StorageProvider>;

/// Loads and saves the record of one counter identity.
///
/// Each identity is a separate partition. Implementations never need to
/// coordinate writes to the same identity: only that identity's actor calls
/// [`save`](StorageProvider::save) for it, one call at a time.
#[async_trait]
pub trait StorageProvider: Send + Sync + Debug {
    /// Loads the record for `id`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))`: a record was committed earlier
    /// - `Ok(None)`: the counter has never been written
    /// - `Err(StorageError)`: the backend could not answer
    async fn load(&self, id: &CounterId) -> Result<Option<CounterRecord>, StorageError>;

    /// Persists `record` for `id`, replacing any previous record.
    ///
    /// A failed save must leave the previous record intact.
    async fn save(&self, id: &CounterId, record: &CounterRecord) -> Result<(), StorageError>;
}
