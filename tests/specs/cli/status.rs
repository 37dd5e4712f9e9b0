// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `simlink status` specs

use crate::prelude::*;

fn version_peer() -> FakePeer {
    FakePeer::once(|s| {
        s.handshake()?;
        s.expect_line("Version")?;
        s.put_line("SimStation")?;
        s.put_i32(64)?;
        s.put_line("5.7.0")?;
        s.put_line("2026-03-01")?;
        s.ok()
    })
    .unwrap()
}

#[test]
fn status_prints_station_version() {
    let peer = version_peer();
    cli()
        .peer(&peer)
        .args(&["status"])
        .passes()
        .stdout_has("SimStation 5.7.0")
        .stdout_has(&format!("127.0.0.1:{}", peer.port()))
        .stdout_has("64-bit");
    peer.join().unwrap();
}

#[test]
fn status_json_includes_endpoint() {
    let peer = version_peer();
    let output = cli().peer(&peer).args(&["-o", "json", "status"]).passes();

    let report = &output.json_lines()[0];
    assert_eq!(report["app"], "SimStation");
    assert_eq!(report["endpoint"], format!("127.0.0.1:{}", peer.port()));
    assert_eq!(report["bits"], 64);
    peer.join().unwrap();
}

#[test]
fn unreachable_station_fails_with_hint() {
    let port = closed_port().to_string();
    cli()
        .args(&["--port", port.as_str(), "status"])
        .fails()
        .exit_code(1)
        .stderr_has("cannot reach simulation station")
        .stderr_has("--launch");
}

#[test]
fn rejected_handshake_is_reported() {
    let peer = FakePeer::once(|s| s.reject("BUSY")).unwrap();
    cli().peer(&peer).args(&["status"]).fails().stderr_has("BUSY");
    peer.join().unwrap();
}
