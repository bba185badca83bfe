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

use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::marker::PhantomData;

use tokio::sync::mpsc::Receiver;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

pub use idle::Idle;

use crate::actor::{CounterHandle, KeepAlive};
use crate::common::CounterId;
use crate::message::Envelope;
use crate::storage::CounterRecord;
use crate::traits::SharedStorage;

mod idle;
/// Contains the `Started` type-state marker and the mailbox loop.
pub mod started;

/// The single owner of one counter's state.
///
/// A `CounterActor` exists once per [`CounterId`] in a registry. All access goes
/// through its mailbox and is handled by one task, so the value is never
/// touched concurrently and needs no locking.
///
/// The `ActorState` parameter is a type-state marker: [`Idle`] while the actor
/// is being built, [`started::Started`] while its loop is running.
pub struct CounterActor<ActorState> {
    /// The identity this actor serves; also its storage key.
    pub(crate) id: CounterId,
    /// Handle given out to callers.
    pub(crate) handle: CounterHandle,
    /// Durable storage shared with the rest of the registry.
    pub(crate) storage: SharedStorage,
    /// The last committed record. `None` until loaded, and after a missing
    /// record was loaded as the default.
    pub(crate) record: Option<CounterRecord>,
    /// `true` once storage has been read for this activation.
    pub(crate) loaded: bool,
    /// Advisory keep-alive timer.
    pub(crate) keep_alive: KeepAlive,
    /// Incoming requests and signals.
    pub(crate) inbox: Receiver<Envelope>,
    /// Tracks the mailbox task.
    pub(crate) tracker: TaskTracker,
    /// Forceful shutdown.
    pub(crate) cancellation_token: CancellationToken,
    _actor_state: PhantomData<ActorState>,
}

impl<ActorState> CounterActor<ActorState> {
    /// Returns the committed value, or 0 if nothing has been committed.
    #[inline]
    pub fn value(&self) -> i64 {
        self.record.map_or(0, |record| record.value)
    }

    /// Moves the actor into another lifecycle state.
    pub(crate) fn transition<NextState>(self) -> CounterActor<NextState> {
        CounterActor {
            id: self.id,
            handle: self.handle,
            storage: self.storage,
            record: self.record,
            loaded: self.loaded,
            keep_alive: self.keep_alive,
            inbox: self.inbox,
            tracker: self.tracker,
            cancellation_token: self.cancellation_token,
            _actor_state: PhantomData,
        }
    }
}

impl<ActorState> Debug for CounterActor<ActorState> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CounterActor")
            .field("id", &self.id)
            .field("record", &self.record)
            .field("keep_alive", &self.keep_alive)
            .finish_non_exhaustive()
    }
}
