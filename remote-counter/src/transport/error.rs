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

/// Errors raised while carrying a request to the front door.
///
/// These never reach an end caller as-is: [`Transport::forward`](crate::traits::Transport::forward)
/// turns every one of them into the same `503` a storage outage produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The configured endpoint is not a usable base URL.
    InvalidEndpoint(String),
    /// The endpoint refused or dropped the connection.
    Unreachable(String),
    /// No response arrived within the request timeout.
    Timeout,
    /// The front door could not produce a response.
    Unavailable(String),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEndpoint(msg) => write!(f, "Invalid endpoint: {msg}"),
            Self::Unreachable(msg) => write!(f, "Endpoint unreachable: {msg}"),
            Self::Timeout => write!(f, "Request timed out"),
            Self::Unavailable(msg) => write!(f, "Front door unavailable: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Unreachable(err.to_string())
        } else {
            Self::Unavailable(err.to_string())
        }
    }
}
