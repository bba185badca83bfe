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

use std::panic::AssertUnwindSafe;
use std::sync::atomic::Ordering;

use chrono::Utc;
use futures::FutureExt;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, instrument, trace, warn};

use crate::actor::CounterActor;
use crate::message::{CounterError, CounterOp, CounterSnapshot, Envelope, SystemSignal};
use crate::storage::CounterRecord;

/// Type-state marker for a [`CounterActor`] whose mailbox loop is running.
///
/// In this state the actor owns its inbox exclusively and handles one
/// envelope at a time: an operation is read, applied, persisted and answered
/// before the next envelope is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Started;

impl CounterActor<Started> {
    #[instrument(skip(self), fields(id = %self.id))]
    pub(crate) async fn wake(&mut self) {
        let cancel_token = self.cancellation_token.clone();
        let mut cancel = Box::pin(cancel_token.cancelled());

        loop {
            let next_wake = self.keep_alive.next_wake();
            tokio::select! {
                () = &mut cancel => {
                    trace!("Forceful cancellation triggered");
                    break;
                }

                () = sleep_until(next_wake.unwrap_or_else(Instant::now)), if next_wake.is_some() => {
                    self.keep_alive.fire(Instant::now());
                    self.handle.stats.keep_alive_fires.fetch_add(1, Ordering::Relaxed);
                    trace!(fires = self.keep_alive.fires(), "Keep-alive fired");
                }

                incoming = self.inbox.recv() => {
                    let Some(envelope) = incoming else { break; };
                    match envelope {
                        Envelope::Request { op, reply_to, timestamp } => {
                            self.keep_alive.arm(Instant::now());
                            trace!(%op, queued_for = ?timestamp.elapsed(), "Handling request");
                            let outcome = self.handle_request(op).await;
                            self.handle.stats.requests.fetch_add(1, Ordering::Relaxed);
                            if reply_to.send(outcome).is_err() {
                                debug!(%op, "Caller went away before the reply");
                            }
                        }
                        Envelope::Signal(SystemSignal::Terminate) => {
                            trace!("Terminate signal received");
                            break;
                        }
                    }
                }
            }
        }

        self.inbox.close();
        debug!(value = self.value(), "Counter actor stopped");
    }

    /// Applies one operation, converting a panic into a storage outage.
    ///
    /// After a panic the in-memory state is discarded and reloaded from
    /// storage on the next request.
    async fn handle_request(&mut self, op: CounterOp) -> Result<CounterSnapshot, CounterError> {
        let outcome = AssertUnwindSafe(self.apply(op)).catch_unwind().await;
        match outcome {
            Ok(outcome) => outcome,
            Err(_) => {
                error!(%op, "Counter operation panicked; state will be reloaded");
                self.record = None;
                self.loaded = false;
                Err(CounterError::StorageUnavailable(format!("{op} panicked")))
            }
        }
    }

    async fn apply(&mut self, op: CounterOp) -> Result<CounterSnapshot, CounterError> {
        self.ensure_loaded().await?;
        if !op.is_mutation() {
            return Ok(self.snapshot());
        }
        if op.delta() < 1 {
            return Err(CounterError::InvalidInput(
                "Amount must be a positive integer".to_string(),
            ));
        }
        let next = self.value().checked_add(op.delta()).ok_or_else(|| {
            CounterError::InvalidInput("Counter value would overflow".to_string())
        })?;
        self.commit(next).await?;
        Ok(self.snapshot())
    }

    /// Load-or-default: a missing record is the value 0, not an error.
    async fn ensure_loaded(&mut self) -> Result<(), CounterError> {
        if self.loaded {
            return Ok(());
        }
        match self.storage.load(&self.id).await {
            Ok(record) => {
                self.record = record;
                self.loaded = true;
                debug!(value = self.value(), "Counter state loaded");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Failed to load counter state");
                Err(err.into())
            }
        }
    }

    /// Persists `value`, updating the in-memory record only once the save succeeded.
    async fn commit(&mut self, value: i64) -> Result<(), CounterError> {
        let record = CounterRecord::new(value, Utc::now());
        if let Err(err) = self.storage.save(&self.id, &record).await {
            warn!(error = %err, value, "Failed to persist counter value");
            return Err(err.into());
        }
        self.record = Some(record);
        Ok(())
    }

    fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            value: self.value(),
            id: self.id.clone(),
            last_modified: self.record.map(|record| record.last_modified),
            timestamp: Utc::now(),
        }
    }
}
