// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `simlink items` specs

use crate::prelude::*;

fn list_peer(command: &'static str, kind: Option<i32>, names: &'static [&'static str]) -> FakePeer {
    FakePeer::once(move |s| {
        s.handshake()?;
        s.expect_line(command)?;
        if let Some(kind) = kind {
            assert_eq!(s.get_i32()?, kind);
        }
        s.put_i32(names.len() as i32)?;
        for name in names {
            s.put_line(name)?;
        }
        s.ok()
    })
    .unwrap()
}

#[test]
fn items_lists_every_name() {
    let peer = list_peer("G_List_Items", None, &["Station", "Frame1", "UR10"]);
    cli().peer(&peer).args(&["items"]).passes().stdout_has("Frame1\nUR10");
    peer.join().unwrap();
}

#[test]
fn items_filters_by_type() {
    let peer = list_peer("G_List_Items_Type", Some(3), &["Frame1"]);
    let output = cli().peer(&peer).args(&["items", "--type", "frame", "-o", "json"]).passes();
    assert_eq!(output.json_lines()[0], serde_json::json!(["Frame1"]));
    peer.join().unwrap();
}

#[test]
fn empty_station_says_so() {
    let peer = list_peer("G_List_Items", None, &[]);
    cli().peer(&peer).args(&["items"]).passes().stdout_has("No items");
    peer.join().unwrap();
}

#[test]
fn unknown_type_is_a_usage_error() {
    cli().args(&["items", "--type", "spaceship"]).fails().stderr_has("unknown item type");
}
