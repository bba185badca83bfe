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

/// An operation addressed to a single counter actor.
///
/// Operations are applied strictly one at a time in mailbox order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterOp {
    /// Read the current value without mutating it.
    Get,
    /// Add one to the value and persist it.
    Increment,
    /// Add a positive amount to the value and persist it.
    Add(i64),
}

impl CounterOp {
    /// Returns `true` for operations that write to storage.
    #[inline]
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        !matches!(self, Self::Get)
    }

    /// The amount this operation adds to the current value.
    #[inline]
    #[must_use]
    pub const fn delta(&self) -> i64 {
        match self {
            Self::Get => 0,
            Self::Increment => 1,
            Self::Add(amount) => *amount,
        }
    }
}

impl std::fmt::Display for CounterOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Increment => write!(f, "increment"),
            Self::Add(amount) => write!(f, "add({amount})"),
        }
    }
}
