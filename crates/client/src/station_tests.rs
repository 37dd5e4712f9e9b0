// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use simlink_wire::WireError;

use crate::test_support::{FakePeer, PeerSession};

use super::*;

fn connect(
    script: impl FnOnce(&mut PeerSession) -> Result<(), WireError> + Send + 'static,
) -> (FakePeer, Client) {
    let peer = FakePeer::once(move |s| {
        s.handshake()?;
        script(s)
    })
    .unwrap();
    let client = Client::connect(peer.config()).unwrap();
    (peer, client)
}

#[test]
fn version_reads_four_fields() {
    let (peer, client) = connect(|s| {
        s.expect_line("Version")?;
        s.put_line("SimStation")?;
        s.put_i32(64)?;
        s.put_line("5.7.0")?;
        s.put_line("2026-03-01")?;
        s.ok()
    });

    let version = client.version().unwrap();
    assert_eq!(
        version,
        StationVersion {
            app: "SimStation".into(),
            bits: 64,
            version: "5.7.0".into(),
            build_date: "2026-03-01".into(),
        }
    );
    drop(client);
    peer.join().unwrap();
}

#[test]
fn item_lookup_by_type_uses_second_form() {
    let (peer, client) = connect(|s| {
        s.expect_line("G_Item")?;
        assert_eq!(s.get_line()?, "Frame1");
        s.put_u64(42)?;
        s.put_i32(3)?;
        s.ok()?;
        s.expect_line("G_Item2")?;
        assert_eq!(s.get_line()?, "Missing");
        assert_eq!(s.get_i32()?, 2);
        s.put_u64(0)?;
        s.put_i32(-1)?;
        s.ok()
    });

    let frame = client.item("Frame1", None).unwrap();
    assert_eq!(frame.handle(), Handle::new(42, ItemType::Frame));
    assert!(!client.item("Missing", Some(ItemType::Robot)).unwrap().is_valid());
    drop((frame, client));
    peer.join().unwrap();
}

#[test]
fn item_names_filtered_by_type() {
    let (peer, client) = connect(|s| {
        s.expect_line("G_List_Items_Type")?;
        assert_eq!(s.get_i32()?, 6);
        s.put_i32(2)?;
        s.put_line("Target 1")?;
        s.put_line("Target 2")?;
        s.ok()
    });

    assert_eq!(client.item_names(Some(ItemType::Target)).unwrap(), vec!["Target 1", "Target 2"]);
    drop(client);
    peer.join().unwrap();
}

#[test]
fn item_list_returns_handles() {
    let (peer, client) = connect(|s| {
        s.expect_line("G_List_Items_ptr")?;
        s.put_i32(1)?;
        s.put_u64(9)?;
        s.put_i32(1)?;
        s.ok()
    });

    let items = client.item_list(None).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].kind(), ItemType::Station);
    drop((items, client));
    peer.join().unwrap();
}

#[test]
fn collision_line_without_hit_is_none() {
    let (peer, client) = connect(|s| {
        s.expect_line("CollisionLine")?;
        assert_eq!(s.get_xyz()?, [0.0, 0.0, 0.0]);
        assert_eq!(s.get_xyz()?, [0.0, 0.0, 1000.0]);
        s.put_u64(0)?;
        s.put_i32(-1)?;
        s.put_xyz(&[0.0; 3])?;
        s.ok()?;
        s.expect_line("CollisionLine")?;
        s.get_xyz()?;
        s.get_xyz()?;
        s.put_u64(5)?;
        s.put_i32(5)?;
        s.put_xyz(&[0.0, 0.0, 400.0])?;
        s.ok()
    });

    assert_eq!(client.collision_line([0.0; 3], [0.0, 0.0, 1000.0]).unwrap(), None);
    let hit = client.collision_line([0.0; 3], [0.0, 0.0, 1000.0]).unwrap().unwrap();
    assert_eq!(hit.item.kind(), ItemType::Object);
    assert_eq!(hit.point, [0.0, 0.0, 400.0]);
    drop((hit, client));
    peer.join().unwrap();
}

#[test]
fn add_curve_sends_matrix_and_options() {
    let points = Matrix::from_columns(&[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0]]).unwrap();
    let expected = points.clone();
    let (peer, client) = connect(move |s| {
        s.expect_line("AddWire")?;
        let got = s.get_matrix()?;
        assert_eq!(got, expected);
        assert_eq!(s.get_u64()?, 0);
        assert_eq!(s.get_i32()?, 0);
        assert_eq!(s.get_i32()?, Projection::AlongNormal.code());
        s.put_u64(77)?;
        s.put_i32(5)?;
        s.ok()
    });

    let curve = client.add_curve(&points, None, false, Projection::AlongNormal).unwrap();
    assert_eq!(curve.id(), 77);
    drop((curve, client));
    peer.join().unwrap();
}

#[test]
fn unknown_param_is_none() {
    let (peer, client) = connect(|s| {
        s.expect_line("G_Param")?;
        assert_eq!(s.get_line()?, "PATH_LIBRARY");
        s.put_line("UNKNOWN PATH_LIBRARY")?;
        s.ok()?;
        s.expect_line("S_Param")?;
        assert_eq!(s.get_line()?, "SPEED");
        assert_eq!(s.get_line()?, "50");
        s.ok()
    });

    assert_eq!(client.param("PATH_LIBRARY").unwrap(), None);
    client.set_param("SPEED", "50").unwrap();
    drop(client);
    peer.join().unwrap();
}

#[test]
fn status_bar_message_uses_default_timeout() {
    let (peer, client) = connect(|s| {
        s.expect_line("ShowMessageStatus")?;
        assert_eq!(s.get_line()?, "two lines");
        s.ok()
    });

    client.show_message("two\nlines", false).unwrap();
    drop(client);
    peer.join().unwrap();
}
