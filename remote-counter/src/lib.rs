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

#![forbid(unsafe_code)]
#![forbid(missing_docs)]

//! # Remote Counter
//!
//! Durable, named counters served by single-threaded actors on top of Tokio.
//! Each counter name maps to exactly one actor identity; the actor owns the
//! counter's value, serializes every operation through its mailbox and
//! persists each committed mutation before answering.
//!
//! ## Key Concepts
//!
//! - **Actors (`CounterActor`)**: one mailbox task per identity, type-state
//!   lifecycle (`Idle`, `Started`), load-or-default activation and an advisory
//!   keep-alive timer.
//! - **Handles (`CounterHandle`)**: clonable references used to send `get`,
//!   `increment` and `add` requests and to stop an actor.
//! - **Registry (`CounterRegistry`)**: derives identities from names and
//!   activates actors lazily and idempotently.
//! - **Front door (`FrontDoor`)**: parses `/counter/{name}[/increment|/add]`,
//!   validates names and turns actor outcomes into JSON responses.
//! - **Transports (`DirectTransport`, `BoundTransport`)**: the two ways a
//!   caller reaches the front door, selected once at startup.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use remote_counter::prelude::*;
//!
//! let host = CounterHost::with_storage(&CounterConfig::default(), MemoryStorage::shared());
//! let transport = host.transport(&TransportConfig::bound())?;
//! let reply = transport.forward("demo", Method::POST, None).await;
//! assert_eq!(reply.counter_body().map(|b| b.count), Some(1));
//! ```

/// Runtime plumbing: configuration, identities, the registry and the host.
pub(crate) mod common;

/// The counter actor and its type-state lifecycle.
pub(crate) mod actor;

/// Requests, replies and the error taxonomy exchanged with actors.
pub(crate) mod message;

/// Durable storage backends for counter records.
pub(crate) mod storage;

/// The stateless routing front door.
pub(crate) mod routing;

/// Direct and bound transports plus the development HTTP host.
pub(crate) mod transport;

/// Seams: storage providers, transports and caller-side authorization.
pub(crate) mod traits;

/// Caller-side facade used by the web layer.
pub mod client;

/// A prelude module for conveniently importing the most commonly used items.
///
/// # Re-exports
///
/// ## External Crates
/// *   [`async_trait::async_trait`]: needed to implement [`StorageProvider`](crate::traits::StorageProvider),
///     [`Transport`](crate::traits::Transport) outside this crate.
/// *   [`http::Method`] and [`http::StatusCode`]: the request and response vocabulary.
///
/// ## Core Types
/// *   [`crate::actor::CounterActor`], [`crate::actor::Idle`], [`crate::actor::Started`]
/// *   [`crate::actor::CounterHandle`] and [`crate::actor::ActorStats`]
/// *   [`crate::common::CounterHost`], [`crate::common::CounterRegistry`]
/// *   [`crate::common::CounterConfig`] and its sections
/// *   [`crate::routing::FrontDoor`], [`crate::routing::CounterRequest`], [`crate::routing::CounterResponse`]
/// *   [`crate::transport::DirectTransport`], [`crate::transport::BoundTransport`]
/// *   [`crate::storage::MemoryStorage`], [`crate::storage::FileStorage`]
pub mod prelude {
    pub use async_trait::async_trait;
    pub use bytes::Bytes;
    pub use http::{Method, StatusCode};

    pub use crate::actor::{
        ActorStats, CounterActor, CounterHandle, Idle, KeepAlive, Started, KEEP_ALIVE_INTERVAL,
    };
    pub use crate::client::{CounterClient, CounterView, SessionState};
    pub use crate::common::config::CONFIG;
    pub use crate::common::{
        init_tracing, CounterConfig, CounterHost, CounterId, CounterName, CounterRegistry,
        HostConfig, RegistryConfig, StorageBackend, StorageConfig, TracingConfig,
        TransportConfig, DEFAULT_COUNTER_NAME, MAX_NAME_CHARS, TRANSPORT_ENDPOINT_ENV,
        TRANSPORT_MODE_ENV,
    };
    pub use crate::message::{CounterBody, CounterError, CounterOp, CounterSnapshot, ErrorBody};
    pub use crate::routing::{CounterRequest, CounterResponse, FrontDoor, Route, RouteAction};
    pub use crate::storage::{CounterRecord, FileStorage, MemoryStorage, StorageError};
    pub use crate::traits::{Authorizer, SharedStorage, StorageProvider, Transport};
    pub use crate::transport::{
        connect, router, serve, BoundTransport, DirectTransport, TransportError, TransportMode,
    };
}
