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

//! The two ways a caller reaches the front door, and the HTTP host that makes
//! the direct way possible in development.
//!
//! A transport is chosen once, at startup, by [`connect`]. Both produce
//! byte-identical bodies for identical actor outcomes.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

pub use bound::BoundTransport;
pub use direct::DirectTransport;
pub use error::TransportError;
pub use http_host::{router, serve};

use crate::common::TransportConfig;
use crate::routing::FrontDoor;
use crate::traits::Transport;

mod bound;
mod direct;
mod error;
/// The development HTTP host.
mod http_host;

/// Which transport a process uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// HTTP to the local actor host.
    Direct,
    /// In-process call into a co-located front door.
    Bound,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Bound => write!(f, "bound"),
        }
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "bound" => Ok(Self::Bound),
            other => Err(format!("unknown transport mode '{other}'")),
        }
    }
}

/// Selects the transport for this process.
///
/// # Errors
///
/// Returns an error if bound mode is requested without a front door, or the
/// direct endpoint is unusable.
pub fn connect(
    config: &TransportConfig,
    front_door: Option<FrontDoor>,
) -> anyhow::Result<Arc<dyn Transport>> {
    let transport: Arc<dyn Transport> = match config.mode {
        TransportMode::Direct => {
            Arc::new(DirectTransport::new(&config.endpoint, config.request_timeout())?)
        }
        TransportMode::Bound => {
            let front_door = front_door.ok_or_else(|| {
                anyhow::anyhow!("Bound transport requires a co-located front door")
            })?;
            Arc::new(BoundTransport::new(front_door))
        }
    };
    info!(mode = %config.mode, "Transport selected");
    Ok(transport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_parse_case_insensitively() {
        assert_eq!("Direct".parse::<TransportMode>(), Ok(TransportMode::Direct));
        assert_eq!(" bound ".parse::<TransportMode>(), Ok(TransportMode::Bound));
        assert!("pigeon".parse::<TransportMode>().is_err());
    }

    #[test]
    fn bound_mode_needs_a_front_door() {
        assert!(connect(&TransportConfig::bound(), None).is_err());
    }
}
