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

use std::fmt;

use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

use crate::message::CounterError;

/// Longest accepted counter name, counted in characters.
pub const MAX_NAME_CHARS: usize = 50;

/// Name used when a request does not carry one.
pub const DEFAULT_COUNTER_NAME: &str = "default";

/// A counter name that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CounterName(String);

impl CounterName {
    /// Validates a caller-supplied name, substituting [`DEFAULT_COUNTER_NAME`]
    /// when it is absent or empty.
    ///
    /// # Errors
    ///
    /// Returns [`CounterError::InvalidInput`] if the name is longer than
    /// [`MAX_NAME_CHARS`] characters or is a dot segment.
    pub fn parse(raw: Option<&str>) -> Result<Self, CounterError> {
        let name = match raw {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_COUNTER_NAME,
        };
        Self::new(name)
    }

    /// Validates a name without defaulting.
    ///
    /// # Errors
    ///
    /// Returns [`CounterError::InvalidInput`] if the name is empty, longer
    /// than [`MAX_NAME_CHARS`] characters, or is `.` or `..`.
    pub fn new(name: impl Into<String>) -> Result<Self, CounterError> {
        let name = name.into();
        let chars = name.chars().count();
        if chars == 0 || chars > MAX_NAME_CHARS {
            return Err(CounterError::InvalidInput(format!(
                "Counter name must be between 1 and {MAX_NAME_CHARS} characters"
            )));
        }
        // URL path normalization removes these segments, so they cannot be
        // addressed over HTTP
        if name == "." || name == ".." {
            return Err(CounterError::InvalidInput(
                "Counter name cannot be '.' or '..'".to_string(),
            ));
        }
        Ok(Self(name))
    }

    /// The validated name.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CounterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content-addressed actor identity: 64 lowercase hex characters of
/// SHA3-256 over the registry namespace and the counter name.
///
/// The identity is both the storage partition key and the routing key, so it
/// must never change for a given namespace and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterId(String);

impl CounterId {
    /// Derives the identity for `name` within `namespace`.
    #[must_use]
    pub fn derive(namespace: &str, name: &str) -> Self {
        let mut hasher = Sha3_256::new();
        hasher.update(namespace.as_bytes());
        hasher.update([0u8]);
        hasher.update(name.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// The hex form of the identity.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_stable_and_hex() {
        let first = CounterId::derive("remote-do", "demo");
        let second = CounterId::derive("remote-do", "demo");
        assert_eq!(first, second);
        assert_eq!(first.as_str().len(), 64);
        assert!(first.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn identity_depends_on_name_and_namespace() {
        let a = CounterId::derive("remote-do", "a");
        assert_ne!(a, CounterId::derive("remote-do", "b"));
        assert_ne!(a, CounterId::derive("other-do", "a"));
        // the separator keeps ("ab", "c") apart from ("a", "bc")
        assert_ne!(
            CounterId::derive("ab", "c"),
            CounterId::derive("a", "bc")
        );
    }

    #[test]
    fn missing_or_empty_name_defaults() {
        assert_eq!(CounterName::parse(None).unwrap().as_str(), DEFAULT_COUNTER_NAME);
        assert_eq!(CounterName::parse(Some("")).unwrap().as_str(), DEFAULT_COUNTER_NAME);
    }

    #[test]
    fn length_limit_counts_characters() {
        let fifty = "n".repeat(MAX_NAME_CHARS);
        let fifty_one = "n".repeat(MAX_NAME_CHARS + 1);
        assert!(CounterName::parse(Some(&fifty)).is_ok());
        assert!(matches!(
            CounterName::parse(Some(&fifty_one)),
            Err(CounterError::InvalidInput(_))
        ));
        // 50 multi-byte characters are still 50 characters
        assert!(CounterName::parse(Some(&"é".repeat(MAX_NAME_CHARS))).is_ok());
        assert!(CounterName::new("").is_err());
    }

    #[test]
    fn dot_segments_are_rejected() {
        for name in [".", ".."] {
            assert!(matches!(
                CounterName::parse(Some(name)),
                Err(CounterError::InvalidInput(_))
            ));
        }
        assert_eq!(CounterName::new("...").unwrap().as_str(), "...");
        assert_eq!(CounterName::new("a.b").unwrap().as_str(), "a.b");
    }
}
