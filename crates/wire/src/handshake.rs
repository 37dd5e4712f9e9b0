// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Startup handshake and event subscription greetings.

use crate::codec::{Decoder, Encoder};
use crate::WireError;

/// First line a client sends on a fresh connection.
pub const GREETING: &str = "CMD_START";

/// The only accepted handshake reply.
pub const READY: &str = "READY";

/// Subscribes a handshaken connection to event delivery.
pub const EVENT_SUBSCRIBE: &str = "RDK_EVT";

/// Lifecycle flags negotiated during the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandshakeFlags {
    /// Ask the peer to guard against unsafe operations.
    pub safe_mode: bool,
    /// Let the peer re-render after each change.
    pub auto_render: bool,
}

impl Default for HandshakeFlags {
    fn default() -> Self {
        Self { safe_mode: true, auto_render: false }
    }
}

/// Write `CMD_START\n` then `"<safe_mode> <auto_render>\n"`.
pub fn write_greeting<E: Encoder + ?Sized>(
    encoder: &mut E,
    flags: HandshakeFlags,
) -> Result<(), WireError> {
    encoder.put_line(GREETING)?;
    encoder.put_line(&format!("{} {}", u8::from(flags.safe_mode), u8::from(flags.auto_render)))
}

/// Read the handshake reply; `Ok(Err(reply))` carries an unexpected answer.
pub fn read_ready<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Result<(), String>, WireError> {
    let reply = decoder.get_line()?;
    if reply == READY {
        Ok(Ok(()))
    } else {
        Ok(Err(reply))
    }
}

/// Write the event subscription request.
pub fn write_subscribe<E: Encoder + ?Sized>(encoder: &mut E) -> Result<(), WireError> {
    encoder.put_line(EVENT_SUBSCRIBE)?;
    encoder.put_i32(0)
}

/// Peer's answer to a subscription request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribeReply {
    pub echo: String,
    pub version: i32,
    pub status: i32,
}

impl SubscribeReply {
    pub fn accepted(&self) -> bool {
        self.echo == EVENT_SUBSCRIBE && self.status == 0
    }
}

pub fn read_subscribe_reply<D: Decoder + ?Sized>(
    decoder: &mut D,
) -> Result<SubscribeReply, WireError> {
    let echo = decoder.get_line()?;
    let version = decoder.get_i32()?;
    let status = decoder.get_i32()?;
    Ok(SubscribeReply { echo, version, status })
}

#[cfg(test)]
#[path = "handshake_tests.rs"]
mod tests;
