// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `simlink events` specs

use crate::prelude::*;

fn put_signal(s: &mut PeerSession, tag: i32, id: u64) -> Result<(), WireError> {
    s.put_i32(tag)?;
    s.put_u64(id)?;
    s.put_i32(3)
}

#[test]
fn events_stop_after_count() {
    let peer = FakePeer::once(|s| {
        s.handshake()?;
        s.accept_subscription(2)?;
        put_signal(s, 17, 4)?;
        put_signal(s, 18, 4)?;
        s.flush()?;
        s.wait_closed()
    })
    .unwrap();

    let output = cli().peer(&peer).args(&["events", "--count", "2", "-o", "json"]).passes();
    let events = output.json_lines();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["kind"], "item_renamed");
    assert_eq!(events[1]["kind"], "item_visibility");
    assert_eq!(events[1]["item"]["id"], 4);
    peer.join().unwrap();
}

#[test]
fn quiet_station_ends_after_timeout() {
    let peer = FakePeer::once(|s| {
        s.handshake()?;
        s.accept_subscription(2)?;
        s.wait_closed()
    })
    .unwrap();

    cli().peer(&peer).args(&["events", "--timeout-ms", "100"]).passes();
    peer.join().unwrap();
}

#[test]
fn text_output_names_the_event() {
    let peer = FakePeer::once(|s| {
        s.handshake()?;
        s.accept_subscription(2)?;
        put_signal(s, 19, 0)?;
        s.flush()?;
        s.wait_closed()
    })
    .unwrap();

    cli()
        .peer(&peer)
        .args(&["events", "--count", "1"])
        .passes()
        .stdout_has("StationChanged #0 frame");
    peer.join().unwrap();
}
