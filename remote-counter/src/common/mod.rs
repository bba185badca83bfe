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

//! Runtime plumbing shared by the rest of the crate.
//!
//! # Key Components
//!
//! *   [`CounterId`] / [`CounterName`]: validated names and the content-addressed
//!     identities derived from them.
//! *   [`CounterRegistry`]: lazy, idempotent activation of one actor per identity.
//! *   [`CounterHost`]: storage, registry and front door wired together.
//! *   [`CounterConfig`]: the XDG/TOML configuration, loaded once into [`config::CONFIG`].
//! *   [`init_tracing`]: installs the global subscriber for binaries.

pub use config::{
    CounterConfig, HostConfig, RegistryConfig, StorageBackend, StorageConfig, TracingConfig,
    TransportConfig, TRANSPORT_ENDPOINT_ENV, TRANSPORT_MODE_ENV,
};
pub use counter_id::{CounterId, CounterName, DEFAULT_COUNTER_NAME, MAX_NAME_CHARS};
pub use counter_registry::CounterRegistry;
pub use host::CounterHost;
pub use logging::init_tracing;

/// Defines the configuration system.
pub mod config;
/// Defines [`CounterId`] and [`CounterName`].
mod counter_id;
/// Defines [`CounterRegistry`].
mod counter_registry;
/// Defines [`CounterHost`].
mod host;
mod logging;
