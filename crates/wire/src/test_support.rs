// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory transport for exercising the protocol without sockets.

use std::collections::VecDeque;
use std::io::{self, ErrorKind};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::transport::{Liveness, Transport};

#[derive(Default)]
struct Script {
    inbound: VecDeque<u8>,
    outbound: Vec<u8>,
    sends: usize,
    recvs: usize,
    timeout: Option<Duration>,
    /// Cap on bytes accepted per send (simulates a short send).
    send_limit: Option<usize>,
    /// Cap on bytes returned per recv (simulates fragmentation).
    recv_chunk: Option<usize>,
    /// When drained: time out instead of reporting end-of-stream.
    hold_open: bool,
    closed: bool,
}

/// Transport that records everything sent and replays scripted input.
///
/// Clones share the same script, so a test can keep one clone for
/// inspection after moving the other into a connection.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes the "peer" will deliver.
    pub fn push_inbound(&self, bytes: &[u8]) {
        self.script.lock().inbound.extend(bytes);
    }

    /// Everything sent so far.
    pub fn outbound(&self) -> Vec<u8> {
        self.script.lock().outbound.clone()
    }

    pub fn take_outbound(&self) -> Vec<u8> {
        std::mem::take(&mut self.script.lock().outbound)
    }

    pub fn send_count(&self) -> usize {
        self.script.lock().sends
    }

    pub fn recv_count(&self) -> usize {
        self.script.lock().recvs
    }

    pub fn remaining_inbound(&self) -> usize {
        self.script.lock().inbound.len()
    }

    pub fn set_send_limit(&self, limit: usize) {
        self.script.lock().send_limit = Some(limit);
    }

    pub fn set_recv_chunk(&self, chunk: usize) {
        self.script.lock().recv_chunk = Some(chunk.max(1));
    }

    /// Report timeouts rather than end-of-stream once input is drained.
    pub fn hold_open(&self) {
        self.script.lock().hold_open = true;
    }

    pub fn is_closed(&self) -> bool {
        self.script.lock().closed
    }
}

impl Transport for ScriptedTransport {
    fn send(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let mut script = self.script.lock();
        if script.closed {
            return Err(io::Error::new(ErrorKind::BrokenPipe, "closed"));
        }
        let n = script.send_limit.map_or(bytes.len(), |limit| limit.min(bytes.len()));
        script.outbound.extend_from_slice(&bytes[..n]);
        script.sends += 1;
        Ok(n)
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut script = self.script.lock();
        script.recvs += 1;
        if script.closed {
            return Ok(0);
        }
        if script.inbound.is_empty() {
            if script.hold_open {
                return Err(io::Error::new(ErrorKind::WouldBlock, "no scripted input"));
            }
            return Ok(0);
        }
        let limit = script.recv_chunk.unwrap_or(usize::MAX).min(buf.len());
        let n = limit.min(script.inbound.len());
        for (slot, byte) in buf.iter_mut().zip(script.inbound.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn set_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        self.script.lock().timeout = timeout;
        Ok(())
    }

    fn timeout(&self) -> io::Result<Option<Duration>> {
        Ok(self.script.lock().timeout)
    }

    fn probe(&mut self) -> io::Result<Liveness> {
        let script = self.script.lock();
        Ok(if script.closed {
            Liveness::Closed
        } else if !script.inbound.is_empty() {
            Liveness::Readable
        } else if script.hold_open {
            Liveness::Idle
        } else {
            Liveness::Closed
        })
    }

    fn close(&mut self) {
        self.script.lock().closed = true;
    }
}
