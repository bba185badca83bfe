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

use std::path::PathBuf;
use std::time::Duration;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::transport::TransportMode;

/// Environment variable that selects the transport mode (`direct` or `bound`).
pub const TRANSPORT_MODE_ENV: &str = "REMOTE_COUNTER_TRANSPORT";

/// Environment variable that overrides the direct transport endpoint.
pub const TRANSPORT_ENDPOINT_ENV: &str = "REMOTE_COUNTER_ENDPOINT";

/// XDG prefix under which `config.toml` and the default data directory live.
const XDG_PREFIX: &str = "remote-counter";

/// Configuration for the counter subsystem.
///
/// Loaded once from `$XDG_CONFIG_HOME/remote-counter/config.toml`; every
/// section falls back to its defaults when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// How callers reach the front door.
    pub transport: TransportConfig,
    /// Identity namespace and actor mailbox sizing.
    pub registry: RegistryConfig,
    /// Where counter records are kept.
    pub storage: StorageConfig,
    /// The development HTTP host.
    pub host: HostConfig,
    /// Log level and optional log file directory.
    pub tracing: TracingConfig,
}

/// Transport selection, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// `direct` (HTTP to `endpoint`) or `bound` (in-process front door).
    pub mode: TransportMode,
    /// Base URL of the local actor host used in direct mode.
    pub endpoint: String,
    /// Per-request timeout for direct mode, in milliseconds.
    pub request_timeout_ms: u64,
}

/// Actor registry settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Namespace mixed into every identity; different namespaces never share actors.
    pub namespace: String,
    /// Capacity of each actor's mailbox.
    pub inbox_capacity: usize,
    /// How long `shutdown_all` waits for actors to drain before cancelling them, in milliseconds.
    pub shutdown_timeout_ms: u64,
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per identity.
    File,
    /// Process-local map; records are lost on exit.
    Memory,
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Which backend to open.
    pub backend: StorageBackend,
    /// Directory for the file backend; defaults to the XDG data home.
    pub directory: Option<PathBuf>,
}

/// Development host settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Socket address the HTTP host listens on.
    pub bind_address: String,
}

/// Tracing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs also go to a daily rolling file in this directory.
    pub log_directory: Option<PathBuf>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            mode: TransportMode::Direct,
            endpoint: "http://127.0.0.1:8787".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            namespace: "remote-do".to_string(),
            inbox_capacity: 255,
            shutdown_timeout_ms: 10_000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            directory: None,
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8787".to_string(),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_directory: None,
        }
    }
}

impl TransportConfig {
    /// Configuration for an in-process transport.
    #[must_use]
    pub fn bound() -> Self {
        Self {
            mode: TransportMode::Bound,
            ..Self::default()
        }
    }

    /// Configuration for an HTTP transport to `endpoint`.
    #[must_use]
    pub fn direct(endpoint: impl Into<String>) -> Self {
        Self {
            mode: TransportMode::Direct,
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// The direct-mode request timeout as a `Duration`.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl RegistryConfig {
    /// The graceful shutdown timeout as a `Duration`.
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}

impl StorageConfig {
    /// The directory the file backend should use.
    ///
    /// Uses the configured directory, else `$XDG_DATA_HOME/remote-counter/counters`.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is configured and the XDG base
    /// directories cannot be determined.
    pub fn resolved_directory(&self) -> anyhow::Result<PathBuf> {
        if let Some(dir) = &self.directory {
            return Ok(dir.clone());
        }
        let xdg_dirs = xdg::BaseDirectories::with_prefix(XDG_PREFIX)?;
        Ok(xdg_dirs.get_data_home().join("counters"))
    }
}

impl CounterConfig {
    /// Parses a TOML document. Missing sections and keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the document is malformed.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Load configuration from XDG-compliant locations, then apply environment overrides.
    ///
    /// Looks for `remote-counter/config.toml` under `$XDG_CONFIG_HOME` (falling
    /// back to `~/.config`). A missing file yields the defaults; a file that
    /// cannot be read or parsed is logged and the defaults are used instead.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::load_file();
        config.apply_env_overrides(
            std::env::var(TRANSPORT_MODE_ENV).ok(),
            std::env::var(TRANSPORT_ENDPOINT_ENV).ok(),
        );
        config
    }

    fn load_file() -> Self {
        let xdg_dirs = match xdg::BaseDirectories::with_prefix(XDG_PREFIX) {
            Ok(dirs) => dirs,
            Err(e) => {
                error!("Failed to initialize XDG directories: {}", e);
                return Self::default();
            }
        };

        let Some(path) = xdg_dirs.find_config_file("config.toml") else {
            info!("No configuration file found, using defaults");
            return Self::default();
        };

        info!("Loading configuration from: {}", path.display());
        match std::fs::read_to_string(&path) {
            Ok(source) => match Self::from_toml_str(&source) {
                Ok(config) => config,
                Err(e) => {
                    error!("Failed to parse configuration file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                error!("Failed to read configuration file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Applies the transport environment overrides.
    ///
    /// An unrecognised mode is logged and ignored.
    pub fn apply_env_overrides(&mut self, mode: Option<String>, endpoint: Option<String>) {
        if let Some(raw) = mode {
            match raw.parse::<TransportMode>() {
                Ok(mode) => self.transport.mode = mode,
                Err(e) => warn!("Ignoring {}: {}", TRANSPORT_MODE_ENV, e),
            }
        }
        if let Some(endpoint) = endpoint.filter(|e| !e.is_empty()) {
            self.transport.endpoint = endpoint;
        }
    }
}

lazy_static! {
    /// Process-wide configuration, read once on first access and never reloaded.
    pub static ref CONFIG: CounterConfig = CounterConfig::load();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = CounterConfig::from_toml_str(
            r#"
            [transport]
            mode = "bound"

            [registry]
            inbox_capacity = 16
            "#,
        )
        .unwrap();
        assert_eq!(config.transport.mode, TransportMode::Bound);
        assert_eq!(config.transport.endpoint, TransportConfig::default().endpoint);
        assert_eq!(config.registry.inbox_capacity, 16);
        assert_eq!(config.registry.namespace, "remote-do");
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn env_overrides_win_and_bad_modes_are_ignored() {
        let mut config = CounterConfig::default();
        config.apply_env_overrides(Some("bound".into()), Some("http://10.0.0.2:9000".into()));
        assert_eq!(config.transport.mode, TransportMode::Bound);
        assert_eq!(config.transport.endpoint, "http://10.0.0.2:9000");

        config.apply_env_overrides(Some("carrier-pigeon".into()), Some(String::new()));
        assert_eq!(config.transport.mode, TransportMode::Bound);
        assert_eq!(config.transport.endpoint, "http://10.0.0.2:9000");
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(CounterConfig::from_toml_str("[registry]\ninbox_capacity = \"lots\"").is_err());
    }
}
