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

//! Defines what travels into and out of a counter actor's mailbox.
//!
//! # Key Components
//!
//! *   [`CounterOp`]: the operations a counter actor understands.
//! *   [`CounterSnapshot`]: the actor's answer to a successful operation.
//! *   [`CounterBody`] / [`ErrorBody`]: the JSON shapes written on the wire.
//! *   [`CounterError`]: the error taxonomy shared by every hop.
//!
//! The internal [`Envelope`] pairs an operation with the one-shot channel the
//! actor answers on, or carries a [`SystemSignal`] for lifecycle control.

pub use counter_error::CounterError;
pub use counter_op::CounterOp;
pub use counter_snapshot::{CounterBody, CounterSnapshot, ErrorBody};

pub(crate) use counter_snapshot::iso8601;
pub(crate) use envelope::{Envelope, SystemSignal};

/// Defines [`CounterError`].
mod counter_error;
/// Defines [`CounterOp`].
mod counter_op;
/// Defines [`CounterSnapshot`] and the wire bodies.
mod counter_snapshot;
/// Defines the internal mailbox `Envelope`.
mod envelope;
