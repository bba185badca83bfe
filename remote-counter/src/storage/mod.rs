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

//! Durable storage for counter records.
//!
//! Every counter identity owns exactly one record, written only by that
//! identity's actor. Backends implement [`StorageProvider`](crate::traits::StorageProvider):
//!
//! *   [`MemoryStorage`]: process-local, for tests and throwaway development hosts.
//! *   [`FileStorage`]: one JSON file per identity, replaced atomically on save.

pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use record::CounterRecord;

mod error;
mod file;
mod memory;
mod record;
