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

use bytes::Bytes;
use http::StatusCode;
use serde::Serialize;
use tracing::error;

use crate::message::{CounterBody, CounterError, CounterSnapshot, ErrorBody};

/// The front door's answer: a status and a JSON body.
///
/// Both transports hand this back unchanged, so identical actor outcomes give
/// byte-identical bodies whichever way the caller is connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// JSON body: [`CounterBody`] on success, [`ErrorBody`] otherwise.
    pub body: Bytes,
}

impl CounterResponse {
    /// Creates a response from its raw parts.
    #[must_use]
    pub const fn new(status: StatusCode, body: Bytes) -> Self {
        Self { status, body }
    }

    /// A `200` carrying the snapshot's [`CounterBody`].
    #[must_use]
    pub fn from_snapshot(snapshot: &CounterSnapshot) -> Self {
        Self::json(StatusCode::OK, &snapshot.to_body())
    }

    /// The error's status carrying its public message as an [`ErrorBody`].
    #[must_use]
    pub fn from_error(err: &CounterError) -> Self {
        Self::json(
            err.status(),
            &ErrorBody {
                error: err.public_message(),
            },
        )
    }

    /// Converts an actor outcome into a response.
    #[must_use]
    pub fn from_outcome(outcome: &Result<CounterSnapshot, CounterError>) -> Self {
        match outcome {
            Ok(snapshot) => Self::from_snapshot(snapshot),
            Err(err) => Self::from_error(err),
        }
    }

    fn json<T: Serialize>(status: StatusCode, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self::new(status, Bytes::from(body)),
            Err(e) => {
                error!("Failed to encode response body: {}", e);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, Bytes::new())
            }
        }
    }

    /// Returns `true` for a 2xx status.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decodes the body as a [`CounterBody`] if the status is a success.
    #[must_use]
    pub fn counter_body(&self) -> Option<CounterBody> {
        if !self.is_success() {
            return None;
        }
        serde_json::from_slice(&self.body).ok()
    }

    /// Decodes the body as an [`ErrorBody`] if the status is not a success.
    #[must_use]
    pub fn error_body(&self) -> Option<ErrorBody> {
        if self.is_success() {
            return None;
        }
        serde_json::from_slice(&self.body).ok()
    }

    /// Converts the response back into an outcome on the caller's side.
    ///
    /// # Errors
    ///
    /// Non-success statuses are rebuilt with [`CounterError::from_status`]; a
    /// body that cannot be decoded is treated as an outage.
    pub fn into_result(self) -> Result<CounterBody, CounterError> {
        if let Some(body) = self.counter_body() {
            return Ok(body);
        }
        match self.error_body() {
            Some(ErrorBody { error }) => Err(CounterError::from_status(self.status, error)),
            None => Err(CounterError::StorageUnavailable(format!(
                "Unreadable response body with status {}",
                self.status
            ))),
        }
    }
}
