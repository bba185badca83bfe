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

use axum::extract::State;
use axum::http::{header, Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use bytes::Bytes;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::routing::{CounterRequest, CounterResponse, FrontDoor};

/// Builds the development host's router: every request goes to `front_door`.
pub fn router(front_door: FrontDoor) -> Router {
    Router::new().fallback(relay).with_state(front_door)
}

async fn relay(
    State(front_door): State<FrontDoor>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> CounterResponse {
    let body = (!body.is_empty()).then_some(body);
    front_door
        .handle(CounterRequest::new(method, uri.path(), body))
        .await
}

impl IntoResponse for CounterResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

/// Serves the front door on `listener` until `shutdown` is cancelled.
///
/// # Errors
///
/// Returns an error if the listener's address cannot be read or the server fails.
pub async fn serve(
    listener: TcpListener,
    front_door: FrontDoor,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    info!("Counter host listening on {}", listener.local_addr()?);
    axum::serve(listener, router(front_door))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;
    info!("Counter host stopped");
    Ok(())
}
