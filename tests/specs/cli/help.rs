// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("status")
        .stdout_has("items")
        .stdout_has("events");
}

#[test]
fn no_command_is_a_usage_error() {
    cli().fails().stderr_has("Usage:").exit_code(2);
}

#[test]
fn events_help_shows_limits() {
    cli().args(&["events", "--help"]).passes().stdout_has("--timeout-ms").stdout_has("--count");
}

#[test]
fn link_flags_are_global() {
    cli().args(&["items", "--help"]).passes().stdout_has("--host").stdout_has("--launch");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}
