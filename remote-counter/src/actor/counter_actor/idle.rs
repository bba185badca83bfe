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

use std::marker::PhantomData;
use std::sync::Arc;

use tokio::sync::mpsc::channel;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{instrument, trace};

use crate::actor::counter_actor::started::Started;
use crate::actor::{ActorStats, CounterActor, CounterHandle, KeepAlive};
use crate::common::CounterId;
use crate::traits::SharedStorage;

/// Type-state marker for a [`CounterActor`] that has been built but whose
/// mailbox loop is not running yet.
///
/// Requests sent to the handle of an idle actor queue up in its inbox and are
/// served once [`CounterActor::start`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Idle;

impl CounterActor<Idle> {
    /// Builds an actor for `id` backed by `storage`.
    ///
    /// Nothing is read from storage here; the state is loaded by the running
    /// actor before it serves its first request.
    ///
    /// # Arguments
    ///
    /// * `id` - The identity the actor serves.
    /// * `storage` - The shared storage backend.
    /// * `inbox_capacity` - Mailbox size; senders wait when it is full.
    /// * `cancellation_token` - Token whose cancellation stops the actor without draining.
    pub fn new(
        id: CounterId,
        storage: SharedStorage,
        inbox_capacity: usize,
        cancellation_token: CancellationToken,
    ) -> Self {
        let (outbox, inbox) = channel(inbox_capacity.max(1));
        let tracker = TaskTracker::new();
        let handle = CounterHandle {
            id: id.clone(),
            outbox,
            tracker: tracker.clone(),
            cancellation_token: cancellation_token.clone(),
            stats: Arc::new(ActorStats::default()),
        };
        Self {
            id,
            handle,
            storage,
            record: None,
            loaded: false,
            keep_alive: KeepAlive::default(),
            inbox,
            tracker,
            cancellation_token,
            _actor_state: PhantomData,
        }
    }

    /// Spawns the mailbox loop and returns the actor's handle.
    ///
    /// Must be called from within a Tokio runtime.
    #[instrument(skip(self), fields(id = %self.id))]
    pub fn start(self) -> CounterHandle {
        let handle = self.handle.clone();
        let tracker = self.tracker.clone();
        let mut actor: CounterActor<Started> = self.transition();
        trace!("Spawning mailbox loop");
        tracker.spawn(async move { actor.wake().await });
        tracker.close();
        handle
    }
}
