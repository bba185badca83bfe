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

//! The caller-side facade used by the web layer.
//!
//! [`CounterClient`] wraps whichever [`Transport`] was selected at startup.
//! It enforces the authorization check before any mutation and gives page
//! loaders a counter to render even when the counter cannot be read.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use http::Method;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::message::{CounterBody, CounterError};
use crate::traits::{Authorizer, Transport};

/// Identity shown when a counter could not be loaded.
const UNAVAILABLE_ID: &str = "unavailable";

#[derive(Serialize)]
struct AddBody {
    amount: i64,
}

/// A simple session flag, for callers without their own session type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    active: bool,
}

impl SessionState {
    /// A caller with an active session.
    #[must_use]
    pub const fn signed_in() -> Self {
        Self { active: true }
    }

    /// A caller without a session.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { active: false }
    }
}

impl Authorizer for SessionState {
    fn has_active_session(&self) -> bool {
        self.active
    }
}

/// What a page renders: a counter, plus the reason if it is a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterView {
    /// The loaded counter, or `{count: 0, id: "unavailable"}`.
    pub counter: CounterBody,
    /// The public error message when the counter could not be loaded.
    pub error: Option<String>,
}

impl CounterView {
    /// Returns `true` if the counter is a placeholder.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

/// Counter operations as seen by callers.
#[derive(Debug, Clone)]
pub struct CounterClient {
    transport: Arc<dyn Transport>,
}

impl CounterClient {
    /// Creates a client over `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// The transport requests go through.
    #[must_use]
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Reads counter `name`. No session is needed.
    ///
    /// # Errors
    ///
    /// The [`CounterError`] rebuilt from the front door's error response.
    #[instrument(skip(self))]
    pub async fn get(&self, name: &str) -> Result<CounterBody, CounterError> {
        self.transport
            .forward(name, Method::GET, None)
            .await
            .into_result()
    }

    /// Increments counter `name` if `session` is active.
    ///
    /// # Errors
    ///
    /// [`CounterError::Unauthorized`] without touching the transport when the
    /// session is not active; otherwise as for [`get`](Self::get).
    #[instrument(skip(self, session))]
    pub async fn increment(
        &self,
        session: &dyn Authorizer,
        name: &str,
    ) -> Result<CounterBody, CounterError> {
        Self::authorize(session)?;
        self.transport
            .forward(name, Method::POST, None)
            .await
            .into_result()
    }

    /// Adds `amount` to counter `name` if `session` is active.
    ///
    /// # Errors
    ///
    /// As for [`increment`](Self::increment); a non-positive `amount` is
    /// rejected by the front door as [`CounterError::InvalidInput`].
    #[instrument(skip(self, session))]
    pub async fn add(
        &self,
        session: &dyn Authorizer,
        name: &str,
        amount: i64,
    ) -> Result<CounterBody, CounterError> {
        Self::authorize(session)?;
        let body = serde_json::to_vec(&AddBody { amount })
            .map_err(|e| CounterError::InvalidInput(e.to_string()))?;
        self.transport
            .forward(name, Method::POST, Some(Bytes::from(body)))
            .await
            .into_result()
    }

    /// Reads counter `name`, substituting a zero placeholder on any failure.
    pub async fn load_or_fallback(&self, name: &str) -> CounterView {
        match self.get(name).await {
            Ok(counter) => CounterView {
                counter,
                error: None,
            },
            Err(err) => {
                warn!(name, error = %err, "Counter unavailable, rendering placeholder");
                CounterView {
                    counter: CounterBody {
                        count: 0,
                        id: UNAVAILABLE_ID.to_string(),
                        timestamp: crate::message::iso8601(&Utc::now()),
                    },
                    error: Some(err.public_message()),
                }
            }
        }
    }

    fn authorize(session: &dyn Authorizer) -> Result<(), CounterError> {
        if session.has_active_session() {
            return Ok(());
        }
        debug!("Rejecting mutation without an active session");
        Err(CounterError::Unauthorized)
    }
}
