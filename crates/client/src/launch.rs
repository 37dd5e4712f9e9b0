// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Start a local simulation station when nothing is listening.

use std::net::{TcpStream, ToSocketAddrs};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::config::LinkConfig;
use crate::env;

const READY_POLL: Duration = Duration::from_millis(100);
const PROBE_TIMEOUT: Duration = Duration::from_millis(200);

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("simulation station not found (searched {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },
    #[error("failed to start {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("station did not listen on {endpoint} within {}ms", .waited.as_millis())]
    NotListening { endpoint: String, waited: Duration },
    #[error("refusing to launch for remote host {0}")]
    RemoteHost(String),
}

fn display_paths(paths: &[PathBuf]) -> String {
    let shown: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
    shown.join(", ")
}

/// Install location used when neither the config nor the environment
/// names one.
pub fn default_app_path() -> PathBuf {
    if cfg!(target_os = "windows") {
        PathBuf::from(r"C:\SimStation\bin\SimStation.exe")
    } else if cfg!(target_os = "macos") {
        PathBuf::from("/Applications/SimStation.app/Contents/MacOS/SimStation")
    } else {
        PathBuf::from("/opt/simstation/bin/SimStation")
    }
}

/// Candidate paths in search order: config, `SIMLINK_APP_PATH`, default.
pub fn app_path_candidates(config: &LinkConfig) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    for path in [config.app_path.clone(), env::app_path(), Some(default_app_path())]
        .into_iter()
        .flatten()
    {
        if !candidates.contains(&path) {
            candidates.push(path);
        }
    }
    candidates
}

/// First candidate that exists as a file.
pub fn resolve_app_path(config: &LinkConfig) -> Result<PathBuf, LaunchError> {
    let searched = app_path_candidates(config);
    searched
        .iter()
        .find(|path| path.is_file())
        .cloned()
        .ok_or(LaunchError::NotFound { searched })
}

/// Spawn the station on the configured port and wait until it listens.
pub fn launch(config: &LinkConfig) -> Result<(), LaunchError> {
    if !config.is_local() {
        return Err(LaunchError::RemoteHost(config.host.clone()));
    }
    let path = resolve_app_path(config)?;
    let mut child = Command::new(&path)
        .arg(format!("-PORT={}", config.port))
        .args(&config.app_args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| LaunchError::Spawn { path: path.clone(), source })?;

    let pid = child.id();
    tracing::info!(path = %path.display(), pid, port = config.port, "station launched");

    // Reap the child so it does not linger as a zombie once it exits
    std::thread::spawn(move || match child.wait() {
        Ok(status) => tracing::info!(pid, %status, "station process exited"),
        Err(e) => tracing::warn!(pid, error = %e, "failed to wait on station process"),
    });

    wait_listening(&config.host, config.port, config.launch_timeout())
}

/// Poll `host:port` until a TCP connect succeeds or `timeout` elapses.
pub fn wait_listening(host: &str, port: u16, timeout: Duration) -> Result<(), LaunchError> {
    let endpoint = format!("{host}:{port}");
    let deadline = Instant::now() + timeout;
    let mut attempt = 0u32;
    loop {
        let addrs: Vec<_> =
            (host, port).to_socket_addrs().map(|resolved| resolved.collect()).unwrap_or_default();
        if addrs.iter().any(|addr| TcpStream::connect_timeout(addr, PROBE_TIMEOUT).is_ok()) {
            tracing::debug!(endpoint = %endpoint, attempt, "station is listening");
            return Ok(());
        }
        if Instant::now() >= deadline {
            tracing::error!(endpoint = %endpoint, attempt, "station failed to start listening");
            return Err(LaunchError::NotListening { endpoint, waited: timeout });
        }
        attempt += 1;
        std::thread::sleep(READY_POLL);
    }
}

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;
