// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-coalescing decorator over a [`Transport`].
//!
//! Arguments of one command are written field by field; this buffer turns
//! them into as few sends as possible. Every read flushes first, since the
//! peer cannot answer bytes it has not received.

use std::time::Duration;

use crate::error::from_io;
use crate::transport::{Liveness, Transport};
use crate::WireError;

/// Expected network MTU.
pub const MTU: usize = 1500;

/// Send buffer size before an automatic flush.
pub const DEFAULT_CAPACITY: usize = 2 * MTU;

const READ_CHUNK: usize = 4096;

/// Longest text line accepted from the peer, terminator excluded.
pub const MAX_LINE: usize = 1 << 20;

pub struct BufferedTransport<T> {
    inner: T,
    tx: Vec<u8>,
    capacity: usize,
    rx: Box<[u8]>,
    rx_pos: usize,
    rx_len: usize,
    /// Bytes that left the process since the last `begin_frame`.
    frame_sent: usize,
}

impl<T: Transport> BufferedTransport<T> {
    pub fn new(inner: T) -> Self {
        Self::with_capacity(inner, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(inner: T, capacity: usize) -> Self {
        Self {
            inner,
            tx: Vec::with_capacity(capacity),
            capacity,
            rx: vec![0u8; READ_CHUNK].into_boxed_slice(),
            rx_pos: 0,
            rx_len: 0,
            frame_sent: 0,
        }
    }

    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Bytes queued but not yet sent.
    pub fn pending_output(&self) -> usize {
        self.tx.len()
    }

    /// Bytes received but not yet consumed.
    pub fn pending_input(&self) -> usize {
        self.rx_len - self.rx_pos
    }

    /// Queue bytes for sending.
    ///
    /// Payloads larger than the buffer flush what is queued, then go out
    /// directly so ordering holds without growing the buffer.
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        if bytes.len() > self.capacity {
            self.flush()?;
            return self.send_all(bytes);
        }
        self.tx.extend_from_slice(bytes);
        if self.tx.len() > self.capacity {
            self.flush()?;
        }
        Ok(())
    }

    /// Send everything queued as one write.
    pub fn flush(&mut self) -> Result<(), WireError> {
        if self.tx.is_empty() {
            return Ok(());
        }
        let tx = std::mem::take(&mut self.tx);
        let result = self.send_all(&tx);
        self.tx = tx;
        self.tx.clear();
        result
    }

    fn send_all(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        let sent = self.inner.send(bytes).map_err(from_io)?;
        self.frame_sent += sent;
        if sent != bytes.len() {
            tracing::debug!(sent, expected = bytes.len(), "peer accepted a partial send");
            return Err(WireError::ShortSend { sent, expected: bytes.len() });
        }
        Ok(())
    }

    /// Flush, then block until `buf` is full.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), WireError> {
        self.flush()?;
        let mut filled = 0;
        while filled < buf.len() {
            if self.pending_input() == 0 {
                // Large reads skip the read-ahead copy
                if buf.len() - filled >= self.rx.len() {
                    let n = self.inner.recv(&mut buf[filled..]).map_err(from_io)?;
                    if n == 0 {
                        return Err(WireError::ConnectionClosed);
                    }
                    filled += n;
                    continue;
                }
                self.refill()?;
            }
            let n = (buf.len() - filled).min(self.pending_input());
            buf[filled..filled + n].copy_from_slice(&self.rx[self.rx_pos..self.rx_pos + n]);
            self.rx_pos += n;
            filled += n;
        }
        Ok(())
    }

    /// Flush, then read up to (and consume) the next `\n`.
    pub fn read_line(&mut self) -> Result<String, WireError> {
        self.flush()?;
        let mut line = Vec::new();
        loop {
            if self.pending_input() == 0 {
                self.refill()?;
            }
            let window = &self.rx[self.rx_pos..self.rx_len];
            match window.iter().position(|b| *b == b'\n') {
                Some(end) => {
                    if line.len() + end > MAX_LINE {
                        return Err(line_too_long(line.len() + end));
                    }
                    line.extend_from_slice(&window[..end]);
                    self.rx_pos += end + 1;
                    break;
                }
                None => {
                    if line.len() + window.len() > MAX_LINE {
                        return Err(line_too_long(line.len() + window.len()));
                    }
                    line.extend_from_slice(window);
                    self.rx_pos = self.rx_len;
                }
            }
        }
        String::from_utf8(line).map_err(|_| WireError::InvalidUtf8)
    }

    /// Block until at least one byte is buffered or the given timeout
    /// elapses. Returns `false` on timeout with nothing consumed.
    pub fn wait_readable(&mut self, timeout: Option<Duration>) -> Result<bool, WireError> {
        self.flush()?;
        if self.pending_input() > 0 {
            return Ok(true);
        }
        let previous = self.timeout()?;
        self.set_timeout(timeout)?;
        let result = self.refill();
        self.set_timeout(previous)?;
        match result {
            Ok(()) => Ok(true),
            Err(WireError::Timeout) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn refill(&mut self) -> Result<(), WireError> {
        self.rx_pos = 0;
        self.rx_len = 0;
        let n = self.inner.recv(&mut self.rx).map_err(from_io)?;
        if n == 0 {
            return Err(WireError::ConnectionClosed);
        }
        self.rx_len = n;
        Ok(())
    }

    pub fn set_timeout(&mut self, timeout: Option<Duration>) -> Result<(), WireError> {
        self.inner.set_timeout(timeout).map_err(WireError::Io)
    }

    pub fn timeout(&self) -> Result<Option<Duration>, WireError> {
        self.inner.timeout().map_err(WireError::Io)
    }

    /// Liveness, counting bytes already read ahead as readable.
    pub fn probe(&mut self) -> Result<Liveness, WireError> {
        if self.pending_input() > 0 {
            return Ok(Liveness::Readable);
        }
        self.inner.probe().map_err(WireError::Io)
    }

    /// Start a new request frame.
    pub fn begin_frame(&mut self) {
        self.frame_sent = 0;
    }

    /// Drop whatever of the current frame is still queued.
    ///
    /// Returns `true` when no byte of the frame reached the socket, i.e. the
    /// stream is still aligned.
    pub fn abandon_frame(&mut self) -> bool {
        self.tx.clear();
        self.frame_sent == 0
    }

    /// Discard buffers and shut the transport down.
    pub fn close(&mut self) {
        self.tx.clear();
        self.rx_pos = 0;
        self.rx_len = 0;
        self.inner.close();
    }
}

fn line_too_long(len: usize) -> WireError {
    WireError::InvalidLength { field: "line", len: len as i64 }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
