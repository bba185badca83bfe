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

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::common::CounterId;

/// The state of one counter as observed by its actor while answering a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterSnapshot {
    /// The committed value at the time of the answer.
    pub value: i64,
    /// The identity of the actor that answered.
    pub id: CounterId,
    /// When the value was last mutated, `None` if it never was.
    pub last_modified: Option<DateTime<Utc>>,
    /// When the answer was produced.
    pub timestamp: DateTime<Utc>,
}

impl CounterSnapshot {
    /// Converts the snapshot into the JSON body returned to callers.
    #[must_use]
    pub fn to_body(&self) -> CounterBody {
        CounterBody {
            count: self.value,
            id: self.id.to_string(),
            timestamp: iso8601(&self.timestamp),
        }
    }
}

/// Successful response body: `{"count": …, "id": …, "timestamp": …}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterBody {
    /// The counter value.
    pub count: i64,
    /// The stable actor identity for the counter name.
    pub id: String,
    /// ISO 8601 UTC timestamp with millisecond precision.
    pub timestamp: String,
}

/// Error response body: `{"error": …}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable description of what went wrong.
    pub error: String,
}

/// Formats a timestamp the way browsers print `Date.toISOString()`.
pub(crate) fn iso8601(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn body_uses_millisecond_utc_timestamps() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 12, 30, 5).unwrap();
        let snapshot = CounterSnapshot {
            value: 3,
            id: CounterId::derive("test", "demo"),
            last_modified: Some(at),
            timestamp: at,
        };
        let body = snapshot.to_body();
        assert_eq!(body.count, 3);
        assert_eq!(body.timestamp, "2024-03-09T12:30:05.000Z");
        assert_eq!(body.id, snapshot.id.as_str());
    }
}
