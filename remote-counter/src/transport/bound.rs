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

use async_trait::async_trait;
use futures::FutureExt;
use tracing::error;

use crate::routing::{CounterRequest, CounterResponse, FrontDoor};
use crate::traits::Transport;
use crate::transport::{TransportError, TransportMode};

/// Calls a co-located front door in-process, with no network hop.
#[derive(Debug, Clone)]
pub struct BoundTransport {
    front_door: FrontDoor,
}

impl BoundTransport {
    /// Binds to `front_door`.
    #[must_use]
    pub const fn new(front_door: FrontDoor) -> Self {
        Self { front_door }
    }
}

#[async_trait]
impl Transport for BoundTransport {
    fn mode(&self) -> TransportMode {
        TransportMode::Bound
    }

    async fn send(&self, request: CounterRequest) -> Result<CounterResponse, TransportError> {
        AssertUnwindSafe(self.front_door.handle(request))
            .catch_unwind()
            .await
            .map_err(|_| {
                error!("Bound front door call panicked");
                TransportError::Unavailable("bound call panicked".to_string())
            })
    }
}
