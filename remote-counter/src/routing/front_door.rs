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

use futures::FutureExt;
use tokio::time::Instant;
use tracing::{debug, error, instrument};

use crate::common::CounterRegistry;
use crate::message::{CounterError, CounterOp, CounterSnapshot};
use crate::routing::{CounterRequest, CounterResponse, Route, RouteAction};

/// The stateless dispatcher between transports and counter actors.
///
/// For each request it parses the route, validates the name, resolves and
/// activates the actor and relays the actor's outcome as a response. It holds
/// no state of its own beyond the registry it dispatches into.
#[derive(Debug, Clone)]
pub struct FrontDoor {
    registry: CounterRegistry,
}

impl FrontDoor {
    /// Creates a front door dispatching into `registry`.
    #[must_use]
    pub const fn new(registry: CounterRegistry) -> Self {
        Self { registry }
    }

    /// The registry requests are dispatched into.
    #[inline]
    #[must_use]
    pub const fn registry(&self) -> &CounterRegistry {
        &self.registry
    }

    /// Handles one request. Never fails: every error becomes a JSON error response.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn handle(&self, request: CounterRequest) -> CounterResponse {
        let started = Instant::now();
        let outcome = match AssertUnwindSafe(self.dispatch(&request))
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(_) => {
                error!("Front door panicked while handling request");
                Err(CounterError::StorageUnavailable("front door panicked".to_string()))
            }
        };
        let response = CounterResponse::from_outcome(&outcome);
        debug!(
            status = response.status.as_u16(),
            elapsed = ?started.elapsed(),
            "Request handled"
        );
        response
    }

    async fn dispatch(&self, request: &CounterRequest) -> Result<CounterSnapshot, CounterError> {
        let route = Route::parse(&request.method, &request.path)?;
        let op = match route.action {
            RouteAction::Get => CounterOp::Get,
            RouteAction::Increment => CounterOp::Increment,
            RouteAction::Add => CounterOp::Add(request.add_amount()?),
        };
        let id = self.registry.resolve(&route.name);
        self.registry.activate(&id).request(op).await
    }
}
