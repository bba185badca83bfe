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
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::join_all;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, trace};

use crate::actor::{CounterActor, CounterHandle, Idle};
use crate::common::{CounterId, CounterName, RegistryConfig};
use crate::traits::SharedStorage;

#[derive(Debug)]
struct RegistryInner {
    namespace: String,
    inbox_capacity: usize,
    shutdown_timeout: Duration,
    storage: SharedStorage,
    actors: DashMap<CounterId, CounterHandle>,
    cancellation_token: CancellationToken,
}

/// Maps counter names to identities and identities to running actors.
///
/// Activation is lazy and idempotent: the first request for an identity
/// starts its actor, later requests reuse it. An actor that has stopped is
/// replaced on the next activation and reloads its value from storage.
///
/// Cloning is cheap; all clones share the same set of actors.
#[derive(Debug, Clone)]
pub struct CounterRegistry(Arc<RegistryInner>);

impl CounterRegistry {
    /// Creates an empty registry whose actors persist through `storage`.
    #[must_use]
    pub fn new(config: &RegistryConfig, storage: SharedStorage) -> Self {
        Self(Arc::new(RegistryInner {
            namespace: config.namespace.clone(),
            inbox_capacity: config.inbox_capacity,
            shutdown_timeout: config.shutdown_timeout(),
            storage,
            actors: DashMap::new(),
            cancellation_token: CancellationToken::new(),
        }))
    }

    /// The namespace mixed into every identity this registry derives.
    #[inline]
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.0.namespace
    }

    /// Derives the identity for a validated counter name.
    #[must_use]
    pub fn resolve(&self, name: &CounterName) -> CounterId {
        CounterId::derive(&self.0.namespace, name.as_str())
    }

    /// Returns the live actor for `id`, starting one if none is running.
    ///
    /// Must be called from within a Tokio runtime.
    #[instrument(skip(self), fields(id = %id))]
    pub fn activate(&self, id: &CounterId) -> CounterHandle {
        match self.0.actors.entry(id.clone()) {
            Entry::Occupied(entry) if entry.get().is_alive() => entry.get().clone(),
            Entry::Occupied(mut entry) => {
                trace!("Replacing stopped actor");
                let handle = self.spawn(id);
                entry.insert(handle.clone());
                handle
            }
            Entry::Vacant(entry) => {
                let handle = self.spawn(id);
                entry.insert(handle.clone());
                handle
            }
        }
    }

    fn spawn(&self, id: &CounterId) -> CounterHandle {
        info!(id = %id, "Activating counter actor");
        CounterActor::<Idle>::new(
            id.clone(),
            self.0.storage.clone(),
            self.0.inbox_capacity,
            self.0.cancellation_token.child_token(),
        )
        .start()
    }

    /// The handle for `id` if its actor is running.
    #[must_use]
    pub fn get(&self, id: &CounterId) -> Option<CounterHandle> {
        self.0
            .actors
            .get(id)
            .map(|entry| entry.value().clone())
            .filter(CounterHandle::is_alive)
    }

    /// Number of actors currently registered.
    #[inline]
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.0.actors.len()
    }

    /// Stops the actor for `id` after it drains its mailbox and forgets it.
    ///
    /// The actor stays registered until its loop has exited, so activations
    /// made meanwhile get the draining handle rather than a second actor;
    /// their requests queue behind the stop and fail as unavailable.
    ///
    /// Returns `false` if no actor was registered. The stored value is kept;
    /// the next activation loads it again.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn evict(&self, id: &CounterId) -> bool {
        let Some(handle) = self.0.actors.get(id).map(|entry| entry.value().clone()) else {
            return false;
        };
        handle.stop().await;
        self.0.actors.remove_if(id, |_, current| !current.is_alive());
        trace!("Counter actor evicted");
        true
    }

    /// Stops every registered actor.
    ///
    /// Actors are asked to finish their queued work first. Any still running
    /// after the configured shutdown timeout are cancelled.
    pub async fn shutdown_all(&self) {
        let handles: Vec<CounterHandle> = self
            .0
            .actors
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        trace!(count = handles.len(), "Sending Terminate signal to all actors");
        let stop_futures = handles.iter().map(|handle| handle.stop());
        if timeout(self.0.shutdown_timeout, join_all(stop_futures))
            .await
            .is_err()
        {
            error!(
                "Shutdown timeout expired after {} ms. Cancelling remaining actors.",
                self.0.shutdown_timeout.as_millis()
            );
            self.0.cancellation_token.cancel();
        } else {
            trace!("All actors stopped gracefully");
        }
        self.0.actors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn registry() -> CounterRegistry {
        CounterRegistry::new(&RegistryConfig::default(), MemoryStorage::shared())
    }

    #[tokio::test]
    async fn activation_is_idempotent() {
        let registry = registry();
        let id = registry.resolve(&CounterName::new("demo").unwrap());
        let first = registry.activate(&id);
        let second = registry.activate(&id);
        assert_eq!(first, second);
        assert_eq!(registry.active_count(), 1);

        first.increment().await.unwrap();
        assert_eq!(second.get().await.unwrap().value, 1);
    }

    #[tokio::test]
    async fn stopped_actors_are_replaced() {
        let registry = registry();
        let id = registry.resolve(&CounterName::new("demo").unwrap());
        let handle = registry.activate(&id);
        handle.increment().await.unwrap();
        handle.stop().await;
        assert!(registry.get(&id).is_none());

        let replacement = registry.activate(&id);
        assert!(replacement.is_alive());
        assert_eq!(replacement.get().await.unwrap().value, 1);
    }

    #[tokio::test]
    async fn evicting_an_unknown_identity_is_a_no_op() {
        let registry = registry();
        let id = registry.resolve(&CounterName::new("ghost").unwrap());
        assert!(!registry.evict(&id).await);
    }

    #[tokio::test]
    async fn eviction_forgets_the_actor_once_stopped() {
        let registry = registry();
        let id = registry.resolve(&CounterName::new("demo").unwrap());
        let handle = registry.activate(&id);
        handle.increment().await.unwrap();

        assert!(registry.evict(&id).await);
        assert!(!handle.is_alive());
        assert_eq!(registry.active_count(), 0);
        assert_eq!(registry.activate(&id).get().await.unwrap().value, 1);
    }
}
