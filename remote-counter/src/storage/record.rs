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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The persisted state of one counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRecord {
    /// The last committed value.
    pub value: i64,
    /// When `value` was committed.
    pub last_modified: DateTime<Utc>,
}

impl CounterRecord {
    /// Creates a record committed at `last_modified`.
    #[must_use]
    pub const fn new(value: i64, last_modified: DateTime<Utc>) -> Self {
        Self {
            value,
            last_modified,
        }
    }
}
