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

use std::time::Duration;

use async_trait::async_trait;
use http::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use tracing::trace;

use crate::routing::{CounterRequest, CounterResponse};
use crate::traits::Transport;
use crate::transport::{TransportError, TransportMode};

/// Reaches the front door over HTTP at a fixed endpoint, the development
/// actor host started by `counter-host`.
#[derive(Debug, Clone)]
pub struct DirectTransport {
    client: Client,
    endpoint: Url,
}

impl DirectTransport {
    /// Creates a transport for `endpoint` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// [`TransportError::InvalidEndpoint`] if `endpoint` is not an absolute
    /// `http`/`https` URL or the HTTP client cannot be built.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, TransportError> {
        let mut endpoint = Url::parse(endpoint)
            .map_err(|e| TransportError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(TransportError::InvalidEndpoint(format!(
                "unsupported scheme '{}'",
                endpoint.scheme()
            )));
        }
        // request paths are joined relative to the endpoint's own path
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::InvalidEndpoint(e.to_string()))?;
        Ok(Self { client, endpoint })
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for DirectTransport {
    fn mode(&self) -> TransportMode {
        TransportMode::Direct
    }

    async fn send(&self, request: CounterRequest) -> Result<CounterResponse, TransportError> {
        let url = self
            .endpoint
            .join(request.path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidEndpoint(e.to_string()))?;
        trace!(method = %request.method, %url, "Sending request");

        let mut builder = self.client.request(request.method, url);
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok(CounterResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_its_base_path() {
        let transport =
            DirectTransport::new("http://127.0.0.1:8787/api", Duration::from_secs(1)).unwrap();
        let url = transport.endpoint().join("counter/demo").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8787/api/counter/demo");
    }

    #[test]
    fn rejects_unusable_endpoints() {
        assert!(matches!(
            DirectTransport::new("not a url", Duration::from_secs(1)),
            Err(TransportError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            DirectTransport::new("ftp://127.0.0.1", Duration::from_secs(1)),
            Err(TransportError::InvalidEndpoint(_))
        ));
    }
}
