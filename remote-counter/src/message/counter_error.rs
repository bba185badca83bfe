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

use http::StatusCode;

use crate::storage::StorageError;

/// Message shown to callers for both storage and transport outages.
const UNAVAILABLE_MESSAGE: &str = "Counter temporarily unavailable";

/// Errors produced anywhere between the caller and durable storage.
///
/// The `String` payloads carry internal detail for logs. What a caller sees is
/// [`CounterError::public_message`], which never includes that detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterError {
    /// Bad counter name or request body. Never mutates state.
    InvalidInput(String),
    /// No route matches the method and path.
    NotFound,
    /// Durable storage could not be read or written. Safe to retry.
    StorageUnavailable(String),
    /// The transport could not reach the front door.
    TransportUnavailable(String),
    /// The caller has no active session. Produced by callers, never by the core.
    Unauthorized,
}

impl CounterError {
    /// The HTTP status this error is reported with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::StorageUnavailable(_) | Self::TransportUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    /// The human-readable message placed in the `error` field of the response body.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => msg.clone(),
            Self::NotFound => "Not found".to_string(),
            Self::StorageUnavailable(_) | Self::TransportUnavailable(_) => {
                UNAVAILABLE_MESSAGE.to_string()
            }
            Self::Unauthorized => "Please sign in".to_string(),
        }
    }

    /// Rebuilds an error from a non-success status and its `error` message.
    ///
    /// 503 responses map to [`CounterError::StorageUnavailable`]: once on the wire,
    /// storage and transport outages are indistinguishable.
    #[must_use]
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::InvalidInput(message),
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            _ => Self::StorageUnavailable(message),
        }
    }

    /// Returns `true` if retrying the same request may succeed.
    #[inline]
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_) | Self::TransportUnavailable(_))
    }
}

impl std::fmt::Display for CounterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Self::NotFound => write!(f, "Not found"),
            Self::StorageUnavailable(msg) => write!(f, "Storage unavailable: {msg}"),
            Self::TransportUnavailable(msg) => write!(f, "Transport unavailable: {msg}"),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl std::error::Error for CounterError {}

impl From<StorageError> for CounterError {
    fn from(err: StorageError) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_errors_look_the_same_to_callers() {
        let storage = CounterError::StorageUnavailable("disk full".into());
        let transport = CounterError::TransportUnavailable("connection refused".into());
        assert_eq!(storage.status(), transport.status());
        assert_eq!(storage.public_message(), transport.public_message());
        assert!(!storage.public_message().contains("disk"));
    }

    #[test]
    fn status_round_trips_through_the_wire() {
        let err = CounterError::InvalidInput("Invalid JSON body".into());
        let rebuilt = CounterError::from_status(err.status(), err.public_message());
        assert_eq!(rebuilt, err);
        assert_eq!(
            CounterError::from_status(StatusCode::NOT_FOUND, "Not found".into()),
            CounterError::NotFound
        );
    }
}
