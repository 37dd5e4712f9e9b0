// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for CLI specs.

pub use simlink::test_support::{FakePeer, PeerSession};
pub use simlink_wire::{Decoder, Encoder, WireError};

const LINK_VARS: &[&str] =
    &["SIMLINK_HOST", "SIMLINK_PORT", "SIMLINK_PORT_END", "SIMLINK_TIMEOUT_MS", "SIMLINK_APP_PATH"];

/// The `simlink` binary with a clean link environment and no color.
pub fn cli() -> Cli {
    let mut cmd = assert_cmd::Command::cargo_bin("simlink").unwrap();
    for var in LINK_VARS {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1").env_remove("SIMLINK_LOG");
    Cli { cmd }
}

pub struct Cli {
    cmd: assert_cmd::Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    /// Point at a scripted peer.
    pub fn peer(self, peer: &FakePeer) -> Self {
        let port = peer.port().to_string();
        self.args(&["--port", port.as_str()])
    }

    pub fn passes(mut self) -> Output {
        let output = Output::from(self.cmd.output().unwrap());
        assert!(output.success, "expected success\nstdout:\n{}\nstderr:\n{}", output.stdout, output.stderr);
        output
    }

    pub fn fails(mut self) -> Output {
        let output = Output::from(self.cmd.output().unwrap());
        assert!(!output.success, "expected failure\nstdout:\n{}", output.stdout);
        output
    }
}

pub struct Output {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for Output {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Output {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn exit_code(self, code: i32) -> Self {
        assert_eq!(self.code, Some(code), "stderr:\n{}", self.stderr);
        self
    }

    /// Stdout as JSON lines.
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout.lines().map(|line| serde_json::from_str(line).unwrap()).collect()
    }
}

/// A port nothing listens on.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
