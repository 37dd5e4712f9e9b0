// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn remote_error_displays_peer_text() {
    let err = ClientError::Remote { command: "S_Name".into(), message: "locked".into() };
    assert_eq!(err.to_string(), "S_Name: locked");
    assert_eq!(err.command(), Some("S_Name"));
    assert!(!err.poisons_connection());
}

#[test]
fn license_error_uses_fixed_text() {
    let err = ClientError::InvalidLicense { command: "G_Name".into() };
    assert_eq!(err.to_string(), format!("G_Name: {INVALID_LICENSE_MESSAGE}"));
}

#[test]
fn wire_faults_poison_the_connection() {
    let err = ClientError::wire("G_Hlocal")(WireError::ConnectionClosed);
    assert!(err.poisons_connection());
    assert_eq!(err.command(), Some("G_Hlocal"));

    let err = ClientError::UnknownStatus { command: "G_Hlocal".into(), code: 42 };
    assert!(err.poisons_connection());
}

#[test]
fn invalid_argument_keeps_the_connection() {
    let err = ClientError::InvalidArgument {
        command: "S_Hlocal".into(),
        source: WireError::InvalidPose("bottom row".into()),
    };
    assert!(!err.poisons_connection());
}

#[test]
fn lifecycle_errors_have_no_command() {
    let err = ClientError::Unreachable { endpoint: "127.0.0.1:20500".into(), reason: "refused".into() };
    assert_eq!(err.command(), None);
    assert!(ClientError::ChannelClosed.command().is_none());
}
