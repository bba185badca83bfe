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

use tokio::sync::oneshot;
use tokio::time::Instant;

use crate::message::{CounterError, CounterOp, CounterSnapshot};

/// Channel half the actor answers a request on.
pub(crate) type ReplyTo = oneshot::Sender<Result<CounterSnapshot, CounterError>>;

/// Control signals that travel through the same mailbox as requests, so that
/// everything queued before them is served first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SystemSignal {
    /// Finish the queued work and stop the actor.
    Terminate,
}

/// What a counter actor's inbox carries.
#[derive(Debug)]
pub(crate) enum Envelope {
    /// A counter operation and where to send its outcome.
    Request {
        op: CounterOp,
        reply_to: ReplyTo,
        timestamp: Instant,
    },
    /// A lifecycle signal.
    Signal(SystemSignal),
}

impl Envelope {
    pub(crate) fn request(op: CounterOp, reply_to: ReplyTo) -> Self {
        Self::Request {
            op,
            reply_to,
            timestamp: Instant::now(),
        }
    }
}
