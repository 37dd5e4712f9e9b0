// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the client crate.

use std::path::PathBuf;
use std::time::Duration;

/// Peer host override
pub fn host() -> Option<String> {
    std::env::var("SIMLINK_HOST").ok().filter(|s| !s.is_empty())
}

/// First port of the range to try
pub fn port() -> Option<u16> {
    std::env::var("SIMLINK_PORT").ok().and_then(|s| s.parse::<u16>().ok())
}

/// Last port (inclusive) of the range to try
pub fn port_end() -> Option<u16> {
    std::env::var("SIMLINK_PORT_END").ok().and_then(|s| s.parse::<u16>().ok())
}

/// Per-call receive timeout override
pub fn timeout() -> Option<Duration> {
    std::env::var("SIMLINK_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Install location of the simulation station, consulted before the
/// platform default when auto-launching.
pub fn app_path() -> Option<PathBuf> {
    std::env::var("SIMLINK_APP_PATH").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}
