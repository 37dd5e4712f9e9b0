// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use proptest::prelude::*;

use super::*;
use crate::test_support::ScriptedTransport;
use crate::{Decoder, Encoder};

fn buffered() -> (BufferedTransport<ScriptedTransport>, ScriptedTransport) {
    let script = ScriptedTransport::new();
    (BufferedTransport::new(script.clone()), script)
}

#[test]
fn small_writes_are_coalesced_until_read() {
    let (mut io, script) = buffered();
    script.push_inbound(&[0, 0, 0, 0]);

    io.put_line("G_Name").unwrap();
    io.put_u64(42).unwrap();
    assert_eq!(script.send_count(), 0);
    assert_eq!(io.pending_output(), 15);

    assert_eq!(io.get_i32().unwrap(), 0);
    assert_eq!(script.send_count(), 1);
    assert_eq!(script.outbound().len(), 15);
}

#[test]
fn buffer_flushes_when_capacity_is_exceeded() {
    let script = ScriptedTransport::new();
    let mut io = BufferedTransport::with_capacity(script.clone(), 8);
    io.write(&[1; 5]).unwrap();
    assert_eq!(script.send_count(), 0);
    io.write(&[2; 5]).unwrap();
    assert_eq!(script.send_count(), 1);
    assert_eq!(io.pending_output(), 0);
}

#[test]
fn large_payload_bypasses_buffer_in_order() {
    let script = ScriptedTransport::new();
    let mut io = BufferedTransport::with_capacity(script.clone(), 8);
    io.write(&[1, 2]).unwrap();
    io.write(&[9; 20]).unwrap();
    assert_eq!(script.send_count(), 2);
    let out = script.outbound();
    assert_eq!(&out[..2], &[1, 2]);
    assert_eq!(&out[2..], &[9; 20]);
}

#[test]
fn short_send_is_fatal() {
    let (mut io, script) = buffered();
    script.set_send_limit(3);
    io.write(&[0; 10]).unwrap();
    let err = io.flush().unwrap_err();
    assert!(matches!(err, WireError::ShortSend { sent: 3, expected: 10 }));
    assert!(err.is_transport());
}

#[test]
fn zero_byte_read_is_connection_closed() {
    let (mut io, _script) = buffered();
    let mut buf = [0u8; 4];
    assert!(matches!(io.read_exact(&mut buf), Err(WireError::ConnectionClosed)));
}

#[test]
fn drained_open_stream_times_out() {
    let (mut io, script) = buffered();
    script.hold_open();
    let mut buf = [0u8; 1];
    assert!(matches!(io.read_exact(&mut buf), Err(WireError::Timeout)));
}

#[test]
fn fragmented_input_is_reassembled() {
    let (mut io, script) = buffered();
    script.set_recv_chunk(1);
    script.push_inbound(b"READY\n");
    script.push_inbound(&7i32.to_be_bytes());
    assert_eq!(io.read_line().unwrap(), "READY");
    assert_eq!(io.get_i32().unwrap(), 7);
}

#[test]
fn unterminated_line_is_capped() {
    let (mut io, script) = buffered();
    script.hold_open();
    script.push_inbound(&vec![b'x'; MAX_LINE + 1]);
    let err = io.read_line().unwrap_err();
    assert!(matches!(err, WireError::InvalidLength { field: "line", .. }), "got {err}");
    assert!(err.is_framing());
}

#[test]
fn line_at_the_limit_is_accepted() {
    let (mut io, script) = buffered();
    let mut bytes = vec![b'y'; MAX_LINE];
    bytes.push(b'\n');
    script.push_inbound(&bytes);
    assert_eq!(io.read_line().unwrap().len(), MAX_LINE);
}

#[test]
fn large_read_fills_directly() {
    let (mut io, script) = buffered();
    let payload: Vec<u8> = (0..10_000u32).map(|i| i as u8).collect();
    script.push_inbound(&payload);
    let mut buf = vec![0u8; payload.len()];
    io.read_exact(&mut buf).unwrap();
    assert_eq!(buf, payload);
}

#[test]
fn wait_readable_times_out_without_consuming() {
    let (mut io, script) = buffered();
    script.hold_open();
    io.set_timeout(Some(Duration::from_secs(5))).unwrap();
    assert!(!io.wait_readable(Some(Duration::from_millis(10))).unwrap());
    assert_eq!(io.timeout().unwrap(), Some(Duration::from_secs(5)));

    script.push_inbound(&[0, 0, 0, 3]);
    assert!(io.wait_readable(Some(Duration::from_millis(10))).unwrap());
    assert_eq!(io.get_i32().unwrap(), 3);
}

#[test]
fn probe_counts_read_ahead_as_readable() {
    let (mut io, script) = buffered();
    script.push_inbound(&[0, 0, 0, 1, 0, 0, 0, 2]);
    assert_eq!(io.get_i32().unwrap(), 1);
    assert_eq!(script.remaining_inbound(), 0);
    assert_eq!(io.probe().unwrap(), Liveness::Readable);
}

#[test]
fn abandoned_frame_is_clean_when_nothing_was_sent() {
    let (mut io, script) = buffered();
    io.begin_frame();
    io.put_line("S_Hlocal").unwrap();
    assert!(io.abandon_frame());
    assert_eq!(io.pending_output(), 0);
    assert_eq!(script.send_count(), 0);
}

#[test]
fn abandoned_frame_is_dirty_after_a_flush() {
    let script = ScriptedTransport::new();
    let mut io = BufferedTransport::with_capacity(script, 4);
    io.begin_frame();
    io.put_line("AddWire").unwrap();
    assert!(!io.abandon_frame());
}

#[test]
fn close_shuts_the_transport() {
    let (mut io, script) = buffered();
    io.write(&[1, 2, 3]).unwrap();
    io.close();
    io.close();
    assert!(script.is_closed());
    assert_eq!(io.pending_output(), 0);
}

proptest! {
    #[test]
    fn buffering_is_transparent(
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..700), 0..12),
        reply in prop::collection::vec(any::<u8>(), 1..64),
    ) {
        // Many writes then one read...
        let split = ScriptedTransport::new();
        split.push_inbound(&reply);
        let mut io = BufferedTransport::new(split.clone());
        for chunk in &chunks {
            io.write(chunk).unwrap();
        }
        let mut got_split = vec![0u8; reply.len()];
        io.read_exact(&mut got_split).unwrap();

        // ...matches one write of the concatenation then the same read.
        let joined = ScriptedTransport::new();
        joined.push_inbound(&reply);
        let mut io = BufferedTransport::new(joined.clone());
        io.write(&chunks.concat()).unwrap();
        let mut got_joined = vec![0u8; reply.len()];
        io.read_exact(&mut got_joined).unwrap();

        prop_assert_eq!(split.outbound(), joined.outbound());
        prop_assert_eq!(got_split, got_joined);
    }
}
