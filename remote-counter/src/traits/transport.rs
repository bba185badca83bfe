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

use std::fmt::Debug;

use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use tracing::warn;

use crate::message::CounterError;
use crate::routing::{CounterRequest, CounterResponse};
use crate::transport::{TransportError, TransportMode};

/// The channel a caller uses to reach the routing front door.
///
/// Exactly one implementation is chosen at process start (see
/// [`connect`](crate::transport::connect)); callers hold it as
/// `Arc<dyn Transport>` and never branch on which one it is.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Which implementation this is. For logging only.
    fn mode(&self) -> TransportMode;

    /// Delivers a fully formed request and returns the front door's response.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the front door could not be reached or its
    /// response could not be read. Responses with error statuses are `Ok`.
    async fn send(&self, request: CounterRequest) -> Result<CounterResponse, TransportError>;

    /// Forwards a counter operation and always produces a response.
    ///
    /// `GET` reads the counter, `POST` without a body increments it and `POST`
    /// with a body adds the JSON `amount`. A name the front door would reject
    /// is answered locally with the same 400. Transport failures become a 503
    /// response with the same body a storage outage would produce.
    async fn forward(&self, name: &str, method: Method, body: Option<Bytes>) -> CounterResponse {
        let request = match CounterRequest::for_counter(name, method, body) {
            Ok(request) => request,
            Err(err) => return CounterResponse::from_error(&err),
        };
        match self.send(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(mode = %self.mode(), error = %err, "Transport failed to reach the front door");
                CounterResponse::from_error(&CounterError::TransportUnavailable(err.to_string()))
            }
        }
    }
}
