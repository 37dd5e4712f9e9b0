// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Link configuration: defaults, optional TOML file, environment.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use simlink_wire::HandshakeFlags;
use thiserror::Error;

use crate::env;

/// Port the simulation station listens on out of the box.
pub const DEFAULT_PORT: u16 = 20500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("port range {start}..={end} is empty")]
    EmptyPortRange { start: u16, end: u16 },
}

/// Where and how to reach the simulation station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkConfig {
    pub host: String,
    /// First port to try.
    pub port: u16,
    /// Last port to try (inclusive); defaults to `port`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_end: Option<u16>,
    pub safe_mode: bool,
    pub auto_render: bool,
    /// Receive timeout applied to every exchange.
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
    /// Start the station locally when nothing is listening.
    pub launch: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_path: Option<PathBuf>,
    pub app_args: Vec<String>,
    pub launch_timeout_ms: u64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            port_end: None,
            safe_mode: true,
            auto_render: false,
            timeout_ms: 10_000,
            connect_timeout_ms: 2_000,
            launch: false,
            app_path: None,
            app_args: Vec::new(),
            launch_timeout_ms: 30_000,
        }
    }
}

impl LinkConfig {
    /// Defaults, then the file at `path` (if given), then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        toml::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Apply `SIMLINK_*` overrides.
    pub fn with_env(mut self) -> Self {
        if let Some(host) = env::host() {
            self.host = host;
        }
        if let Some(port) = env::port() {
            self.port = port;
        }
        if let Some(end) = env::port_end() {
            self.port_end = Some(end);
        }
        if let Some(timeout) = env::timeout() {
            self.timeout_ms = timeout.as_millis() as u64;
        }
        if let Some(path) = env::app_path() {
            self.app_path = Some(path);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ports = self.ports();
        if ports.is_empty() {
            return Err(ConfigError::EmptyPortRange { start: *ports.start(), end: *ports.end() });
        }
        Ok(())
    }

    pub fn ports(&self) -> RangeInclusive<u16> {
        self.port..=self.port_end.unwrap_or(self.port)
    }

    pub fn flags(&self) -> HandshakeFlags {
        HandshakeFlags { safe_mode: self.safe_mode, auto_render: self.auto_render }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn launch_timeout(&self) -> Duration {
        Duration::from_millis(self.launch_timeout_ms)
    }

    /// Whether the host names this machine; only local peers are launched.
    pub fn is_local(&self) -> bool {
        matches!(self.host.as_str(), "localhost" | "127.0.0.1" | "::1" | "[::1]")
    }

    /// `host:port` label for logs and errors.
    pub fn endpoint(&self, port: u16) -> String {
        format!("{}:{}", self.host, port)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
