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

use anyhow::Context;
use tracing::{info, instrument};

use crate::common::{CounterConfig, CounterRegistry, StorageBackend, TransportConfig};
use crate::routing::FrontDoor;
use crate::storage::{FileStorage, MemoryStorage};
use crate::traits::{SharedStorage, Transport};
use crate::transport::connect;

/// A running counter subsystem: storage, registry and front door wired together.
///
/// This is the co-located actor host of the bound topology and the process
/// behind the development HTTP host of the direct topology.
#[derive(Debug, Clone)]
pub struct CounterHost {
    registry: CounterRegistry,
    front_door: FrontDoor,
}

impl CounterHost {
    /// Opens the configured storage backend and builds the host on top of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file backend's directory cannot be resolved or created.
    #[instrument(skip(config))]
    pub async fn launch(config: &CounterConfig) -> anyhow::Result<Self> {
        let storage: SharedStorage = match config.storage.backend {
            StorageBackend::Memory => {
                info!("Using in-memory counter storage");
                MemoryStorage::shared()
            }
            StorageBackend::File => {
                let directory = config.storage.resolved_directory()?;
                let storage = FileStorage::open(directory.clone())
                    .await
                    .with_context(|| format!("Failed to open storage at {}", directory.display()))?;
                info!("Using file counter storage at {}", directory.display());
                Arc::new(storage)
            }
        };
        Ok(Self::with_storage(config, storage))
    }

    /// Builds a host over an already opened storage backend.
    #[must_use]
    pub fn with_storage(config: &CounterConfig, storage: SharedStorage) -> Self {
        let registry = CounterRegistry::new(&config.registry, storage);
        let front_door = FrontDoor::new(registry.clone());
        Self {
            registry,
            front_door,
        }
    }

    /// The registry holding this host's actors.
    #[inline]
    #[must_use]
    pub const fn registry(&self) -> &CounterRegistry {
        &self.registry
    }

    /// The front door serving this host's wire surface.
    #[inline]
    #[must_use]
    pub const fn front_door(&self) -> &FrontDoor {
        &self.front_door
    }

    /// Selects a transport for callers of this host.
    ///
    /// Bound mode calls this host's front door in-process; direct mode ignores
    /// it and talks HTTP to the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the direct endpoint is not a valid URL or the HTTP
    /// client cannot be built.
    pub fn transport(&self, config: &TransportConfig) -> anyhow::Result<Arc<dyn Transport>> {
        connect(config, Some(self.front_door.clone()))
    }

    /// Stops every actor, letting each finish its queued work first.
    pub async fn shutdown(&self) {
        info!(actors = self.registry.active_count(), "Shutting down counter host");
        self.registry.shutdown_all().await;
    }
}
