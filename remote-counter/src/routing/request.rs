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
use http::Method;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Deserialize;

use crate::common::CounterName;
use crate::message::CounterError;
use crate::routing::route::COUNTER_PREFIX;

/// Characters escaped when a counter name is placed in a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const INVALID_BODY: &str = "Invalid JSON body";

#[derive(Deserialize)]
struct AddBody {
    amount: i64,
}

/// A request addressed to the front door, independent of how it travels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path, e.g. `/counter/demo/increment`.
    pub path: String,
    /// Request body, if any.
    pub body: Option<Bytes>,
}

impl CounterRequest {
    /// Creates a request from its raw parts.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>, body: Option<Bytes>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
        }
    }

    /// Builds the request a transport sends for a counter operation.
    ///
    /// `GET` targets `/counter/{name}`, `POST` without a body targets
    /// `/counter/{name}/increment` and `POST` with a body targets
    /// `/counter/{name}/add`. The name is percent-encoded so that the front door
    /// decodes exactly the name given here.
    ///
    /// # Errors
    ///
    /// The same [`CounterError::InvalidInput`] the front door would return if
    /// `name` fails [`CounterName`] validation. Such names are never sent, since
    /// dot segments would be rewritten on the way.
    pub fn for_counter(
        name: &str,
        method: Method,
        body: Option<Bytes>,
    ) -> Result<Self, CounterError> {
        let name = CounterName::parse(Some(name))?;
        let encoded = utf8_percent_encode(name.as_str(), PATH_SEGMENT);
        let path = match (&method, &body) {
            (&Method::POST, None) => format!("{COUNTER_PREFIX}{encoded}/increment"),
            (&Method::POST, Some(_)) => format!("{COUNTER_PREFIX}{encoded}/add"),
            _ => format!("{COUNTER_PREFIX}{encoded}"),
        };
        Ok(Self::new(method, path, body))
    }

    /// Reads the `amount` of an add request body.
    ///
    /// # Errors
    ///
    /// [`CounterError::InvalidInput`] with `Invalid JSON body` if the body is
    /// missing, is not a JSON object with an integer `amount`, or the amount is
    /// less than 1.
    pub fn add_amount(&self) -> Result<i64, CounterError> {
        let invalid = || CounterError::InvalidInput(INVALID_BODY.to_string());
        let body = self.body.as_ref().ok_or_else(invalid)?;
        let AddBody { amount } = serde_json::from_slice(body).map_err(|_| invalid())?;
        if amount < 1 {
            return Err(invalid());
        }
        Ok(amount)
    }
}
