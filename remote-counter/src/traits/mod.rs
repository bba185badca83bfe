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

//! Defines the traits at the seams of the counter subsystem.
//!
//! # Key Traits
//!
//! *   [`StorageProvider`]: loads and saves counter records; implemented by
//!     [`MemoryStorage`](crate::storage::MemoryStorage) and
//!     [`FileStorage`](crate::storage::FileStorage).
//! *   [`Transport`]: the single `forward` operation callers use to reach the
//!     front door, implemented by the direct and bound transports.
//! *   [`Authorizer`]: the caller-side "is there an active session" check
//!     consulted before any mutation.

pub use authorizer::Authorizer;
pub use storage_provider::{SharedStorage, StorageProvider};
pub use transport::Transport;

/// Defines the [`Authorizer`] trait.
mod authorizer;
/// Defines the [`StorageProvider`] trait.
mod storage_provider;
/// Defines the [`Transport`] trait.
mod transport;
