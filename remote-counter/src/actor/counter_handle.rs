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

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{instrument, trace};

use crate::common::CounterId;
use crate::message::{CounterError, CounterOp, CounterSnapshot, Envelope, SystemSignal};

/// Counters kept by a running actor.
#[derive(Debug, Default)]
pub struct ActorStats {
    /// Requests answered.
    pub requests: AtomicU64,
    /// Keep-alive wake-ups.
    pub keep_alive_fires: AtomicU64,
}

impl ActorStats {
    /// Get the number of requests answered.
    #[must_use]
    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Get the number of keep-alive wake-ups.
    #[must_use]
    pub fn keep_alive_fires(&self) -> u64 {
        self.keep_alive_fires.load(Ordering::Relaxed)
    }
}

/// A clonable handle to one counter actor.
///
/// Every method sends an envelope to the actor's mailbox and waits for its
/// answer, so calls made through any number of clones are applied one at a
/// time in arrival order.
///
/// Equality and hashing are based solely on the actor's identity.
#[derive(Debug, Clone)]
pub struct CounterHandle {
    pub(crate) id: CounterId,
    pub(crate) outbox: mpsc::Sender<Envelope>,
    pub(crate) tracker: TaskTracker,
    pub(crate) cancellation_token: CancellationToken,
    pub(crate) stats: Arc<ActorStats>,
}

impl PartialEq for CounterHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CounterHandle {}

impl Hash for CounterHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl CounterHandle {
    /// The identity of the actor behind this handle.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> &CounterId {
        &self.id
    }

    /// Statistics of the actor behind this handle.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> &ActorStats {
        &self.stats
    }

    /// Returns `true` while the actor's mailbox loop is running.
    #[inline]
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.outbox.is_closed()
    }

    /// Reads the current value.
    ///
    /// # Errors
    ///
    /// [`CounterError::StorageUnavailable`] if the state could not be loaded or
    /// the actor is gone.
    pub async fn get(&self) -> Result<CounterSnapshot, CounterError> {
        self.request(CounterOp::Get).await
    }

    /// Adds one to the value and persists it.
    ///
    /// # Errors
    ///
    /// [`CounterError::StorageUnavailable`] if the new value could not be
    /// persisted; the previous value is kept.
    pub async fn increment(&self) -> Result<CounterSnapshot, CounterError> {
        self.request(CounterOp::Increment).await
    }

    /// Adds `amount` to the value and persists it.
    ///
    /// # Errors
    ///
    /// [`CounterError::InvalidInput`] if `amount` is not positive or the value
    /// would overflow; [`CounterError::StorageUnavailable`] as for
    /// [`increment`](Self::increment).
    pub async fn add(&self, amount: i64) -> Result<CounterSnapshot, CounterError> {
        self.request(CounterOp::Add(amount)).await
    }

    #[instrument(skip(self), fields(id = %self.id))]
    pub(crate) async fn request(&self, op: CounterOp) -> Result<CounterSnapshot, CounterError> {
        let (reply_to, reply) = oneshot::channel();
        self.outbox
            .send(Envelope::request(op, reply_to))
            .await
            .map_err(|_| CounterError::StorageUnavailable("actor mailbox closed".to_string()))?;
        reply.await.map_err(|_| {
            CounterError::StorageUnavailable("actor stopped before replying".to_string())
        })?
    }

    /// Stops the actor after the envelopes already queued have been served,
    /// and waits for its loop to finish.
    #[instrument(skip(self), fields(id = %self.id))]
    pub async fn stop(&self) {
        if self
            .outbox
            .send(Envelope::Signal(SystemSignal::Terminate))
            .await
            .is_err()
        {
            trace!("Actor already stopped");
        }
        self.tracker.wait().await;
    }

    /// Stops the actor immediately; queued requests are answered with an error.
    pub async fn cancel(&self) {
        self.cancellation_token.cancel();
        self.tracker.wait().await;
    }
}
