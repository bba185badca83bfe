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

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use remote_counter::prelude::*;

use crate::setup::{host_with, initialize_tracing, memory_host, FlakyStorage};

mod setup;

/// Counts the requests that reach the wrapped transport.
#[derive(Debug)]
struct CountingTransport {
    inner: Arc<dyn Transport>,
    sent: AtomicUsize,
}

#[async_trait]
impl Transport for CountingTransport {
    fn mode(&self) -> TransportMode {
        self.inner.mode()
    }

    async fn send(&self, request: CounterRequest) -> Result<CounterResponse, TransportError> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        self.inner.send(request).await
    }
}

fn counting(host: &CounterHost) -> anyhow::Result<Arc<CountingTransport>> {
    Ok(Arc::new(CountingTransport {
        inner: host.transport(&TransportConfig::bound())?,
        sent: AtomicUsize::new(0),
    }))
}

/// Mutations without an active session are refused before the transport is used.
#[tokio::test]
async fn test_unauthorized_mutations_never_reach_the_transport() -> anyhow::Result<()> {
    initialize_tracing();
    let host = memory_host();
    let transport = counting(&host)?;
    let client = CounterClient::new(transport.clone());

    let err = client
        .increment(&SessionState::anonymous(), "guarded")
        .await
        .unwrap_err();
    assert_eq!(err, CounterError::Unauthorized);
    assert_eq!(err.public_message(), "Please sign in");
    assert!(client.add(&false, "guarded", 3).await.is_err());
    assert_eq!(transport.sent.load(Ordering::SeqCst), 0);

    // reads need no session
    assert_eq!(client.get("guarded").await?.count, 0);
    assert_eq!(transport.sent.load(Ordering::SeqCst), 1);
    Ok(())
}

/// Signed-in callers can increment and add.
#[tokio::test]
async fn test_signed_in_mutations() -> anyhow::Result<()> {
    initialize_tracing();
    let host = memory_host();
    let client = CounterClient::new(host.transport(&TransportConfig::bound())?);
    let session = SessionState::signed_in();

    assert_eq!(client.increment(&session, "mine").await?.count, 1);
    assert_eq!(client.add(&session, "mine", 9).await?.count, 10);
    assert!(matches!(
        client.add(&session, "mine", 0).await,
        Err(CounterError::InvalidInput(_))
    ));
    assert_eq!(client.get("mine").await?.count, 10);
    Ok(())
}

/// Page loads fall back to a zero counter with the public error message.
#[tokio::test]
async fn test_load_or_fallback() -> anyhow::Result<()> {
    initialize_tracing();
    let storage = FlakyStorage::new();
    let host = host_with(storage.clone());
    let client = CounterClient::new(host.transport(&TransportConfig::bound())?);

    client.increment(&true, "page").await?;
    let view = client.load_or_fallback("page").await;
    assert!(!view.is_fallback());
    assert_eq!(view.counter.count, 1);

    storage.fail_reads(true);
    let view = client.load_or_fallback("elsewhere").await;
    assert!(view.is_fallback());
    assert_eq!(view.counter.count, 0);
    assert_eq!(view.counter.id, "unavailable");
    assert_eq!(view.error.as_deref(), Some("Counter temporarily unavailable"));
    Ok(())
}
