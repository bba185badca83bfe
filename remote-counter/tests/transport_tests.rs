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

use std::sync::Arc;

use remote_counter::prelude::*;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::setup::{initialize_tracing, memory_host};

mod setup;

struct RunningHost {
    endpoint: String,
    shutdown: CancellationToken,
    task: JoinHandle<anyhow::Result<()>>,
}

impl RunningHost {
    async fn start(host: &CounterHost) -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let endpoint = format!("http://{}", listener.local_addr()?);
        let shutdown = CancellationToken::new();
        let task = tokio::spawn(serve(
            listener,
            host.front_door().clone(),
            shutdown.clone(),
        ));
        Ok(Self {
            endpoint,
            shutdown,
            task,
        })
    }

    async fn stop(self) -> anyhow::Result<()> {
        self.shutdown.cancel();
        self.task.await?
    }
}

fn direct(endpoint: &str) -> anyhow::Result<Arc<dyn Transport>> {
    connect(&TransportConfig::direct(endpoint), None)
}

/// Both transports reach the same front door and observe the same counter.
#[tokio::test]
async fn test_direct_and_bound_share_state() -> anyhow::Result<()> {
    initialize_tracing();
    let host = memory_host();
    let running = RunningHost::start(&host).await?;

    let direct = direct(&running.endpoint)?;
    let bound = host.transport(&TransportConfig::bound())?;
    assert_eq!(direct.mode(), TransportMode::Direct);
    assert_eq!(bound.mode(), TransportMode::Bound);

    direct.forward("shared", Method::POST, None).await;
    bound.forward("shared", Method::POST, None).await;
    direct
        .forward("shared", Method::POST, Some(Bytes::from_static(br#"{"amount": 3}"#)))
        .await;

    let via_direct = direct.forward("shared", Method::GET, None).await;
    let via_bound = bound.forward("shared", Method::GET, None).await;
    let (direct_body, bound_body) = (
        via_direct.counter_body().expect("counter body"),
        via_bound.counter_body().expect("counter body"),
    );
    assert_eq!(direct_body.count, 5);
    assert_eq!(direct_body.count, bound_body.count);
    assert_eq!(direct_body.id, bound_body.id);

    running.stop().await?;
    host.shutdown().await;
    Ok(())
}

/// Identical failures produce byte-identical responses over both transports.
#[tokio::test]
async fn test_error_responses_are_identical() -> anyhow::Result<()> {
    initialize_tracing();
    let host = memory_host();
    let running = RunningHost::start(&host).await?;
    let direct = direct(&running.endpoint)?;
    let bound = host.transport(&TransportConfig::bound())?;

    let too_long = "y".repeat(51);
    let cases = [
        (too_long.as_str(), Method::GET, None),
        ("demo", Method::DELETE, None),
        ("demo", Method::POST, Some(Bytes::from_static(b"not json"))),
        ("demo", Method::POST, Some(Bytes::from_static(br#"{"amount": -1}"#))),
    ];
    for (name, method, body) in cases {
        let via_direct = direct.forward(name, method.clone(), body.clone()).await;
        let via_bound = bound.forward(name, method.clone(), body).await;
        assert!(!via_direct.is_success(), "{method} {name}");
        assert_eq!(via_direct, via_bound, "{method} {name}");
    }

    running.stop().await?;
    Ok(())
}

/// Names with reserved characters arrive at the same identity over HTTP.
#[tokio::test]
async fn test_names_survive_the_wire() -> anyhow::Result<()> {
    initialize_tracing();
    let host = memory_host();
    let running = RunningHost::start(&host).await?;
    let direct = direct(&running.endpoint)?;

    let name = "a/b c?d#é";
    let response = direct.forward(name, Method::POST, None).await;
    let body = response.counter_body().expect("counter body");
    assert_eq!(body.count, 1);
    assert_eq!(body.id, CounterId::derive("remote-do", name).as_str());

    running.stop().await?;
    Ok(())
}

/// Dot names cannot be rewritten into another counter on the way over HTTP.
#[tokio::test]
async fn test_dot_names_agree_across_transports() -> anyhow::Result<()> {
    initialize_tracing();
    let host = memory_host();
    let running = RunningHost::start(&host).await?;
    let direct = direct(&running.endpoint)?;
    let bound = host.transport(&TransportConfig::bound())?;

    for name in [".", ".."] {
        for method in [Method::GET, Method::POST] {
            let via_direct = direct.forward(name, method.clone(), None).await;
            let via_bound = bound.forward(name, method.clone(), None).await;
            assert_eq!(via_direct.status, StatusCode::BAD_REQUEST, "{method} {name}");
            assert_eq!(via_direct, via_bound, "{method} {name}");
        }
    }

    let via_direct = direct.forward("a.b", Method::POST, None).await;
    let via_bound = bound.forward("a.b", Method::GET, None).await;
    let (direct_body, bound_body) = (
        via_direct.counter_body().expect("counter body"),
        via_bound.counter_body().expect("counter body"),
    );
    assert_eq!(direct_body.id, CounterId::derive("remote-do", "a.b").as_str());
    assert_eq!(direct_body.id, bound_body.id);
    assert_eq!(bound_body.count, 1);

    // the default counter was never touched
    let default = bound.forward("", Method::GET, None).await;
    assert_eq!(default.counter_body().map(|body| body.count), Some(0));

    running.stop().await?;
    Ok(())
}

/// The dev host answers with JSON bodies and the front door's statuses.
#[tokio::test]
async fn test_host_speaks_json() -> anyhow::Result<()> {
    initialize_tracing();
    let host = memory_host();
    let running = RunningHost::start(&host).await?;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/unknown", running.endpoint))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get("content-type").map(|v| v.as_bytes()),
        Some(&b"application/json"[..])
    );
    assert_eq!(response.text().await?, r#"{"error":"Not found"}"#);

    let response = client
        .post(format!("{}/counter/raw", running.endpoint))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: CounterBody = serde_json::from_slice(&response.bytes().await?)?;
    assert_eq!(body.count, 1);

    running.stop().await?;
    Ok(())
}

/// An endpoint nobody listens on yields the same 503 a storage outage does.
#[tokio::test]
async fn test_unreachable_endpoint_is_service_unavailable() -> anyhow::Result<()> {
    initialize_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let endpoint = format!("http://{}", listener.local_addr()?);
    drop(listener);

    let transport = direct(&endpoint)?;
    let response = transport.forward("demo", Method::GET, None).await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response,
        CounterResponse::from_error(&CounterError::StorageUnavailable("disk".into()))
    );
    Ok(())
}

/// Bound mode cannot be selected without a co-located front door, and direct
/// mode rejects endpoints that are not HTTP URLs.
#[tokio::test]
async fn test_transport_selection() -> anyhow::Result<()> {
    initialize_tracing();
    assert!(connect(&TransportConfig::bound(), None).is_err());
    assert!(connect(&TransportConfig::direct("nope"), None).is_err());

    let host = memory_host();
    let transport = connect(&TransportConfig::bound(), Some(host.front_door().clone()))?;
    let response = transport.forward("", Method::GET, None).await;
    assert_eq!(response.counter_body().map(|body| body.count), Some(0));
    Ok(())
}
