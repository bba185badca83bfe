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

//! Defines the counter actor, its handle and its keep-alive schedule.
//!
//! # Key Components
//!
//! *   [`CounterActor`]: owns one counter's value and storage partition. Uses a
//!     type-state parameter: [`Idle`] while being set up, [`Started`] once its
//!     mailbox loop is running.
//! *   [`CounterHandle`]: the clonable way in. Every request goes through the
//!     actor's mailbox, so operations on one identity never overlap.
//! *   [`KeepAlive`]: the advisory wake-up timer that keeps an idle actor warm.

pub use counter_actor::started::Started;
pub use counter_actor::{CounterActor, Idle};
pub use counter_handle::{ActorStats, CounterHandle};
pub use keep_alive::{KeepAlive, KEEP_ALIVE_INTERVAL};

/// Contains `CounterActor` and its state-specific implementations.
mod counter_actor;
/// Contains [`CounterHandle`].
mod counter_handle;
/// Contains [`KeepAlive`].
mod keep_alive;
