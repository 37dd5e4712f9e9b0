// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stream transport abstraction.
//!
//! [`Transport`] is the raw byte pipe under a connection. It knows nothing
//! about framing; ordering and coalescing live in
//! [`BufferedTransport`](crate::BufferedTransport).

use std::io::{self, ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

/// Result of a non-blocking liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// Open, nothing to read.
    Idle,
    /// Open with unread bytes waiting.
    Readable,
    /// Readable with zero bytes available: the peer is closing.
    Closed,
}

/// A blocking, stream-oriented byte pipe.
pub trait Transport: Send {
    /// Hand bytes to the pipe in one call; returns how many were accepted.
    fn send(&mut self, bytes: &[u8]) -> io::Result<usize>;

    /// Block for at least one byte; `Ok(0)` means the peer closed.
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Set the receive timeout (`None` blocks forever).
    fn set_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()>;

    fn timeout(&self) -> io::Result<Option<Duration>>;

    /// Check liveness without blocking and without consuming input.
    fn probe(&mut self) -> io::Result<Liveness>;

    /// Shut the pipe down. Safe to call more than once.
    fn close(&mut self);
}

impl Transport for TcpStream {
    fn send(&mut self, bytes: &[u8]) -> io::Result<usize> {
        Write::write(self, bytes)
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Read::read(self, buf)
    }

    fn set_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        // A zero duration is rejected by the socket layer
        let timeout = timeout.map(|t| t.max(Duration::from_millis(1)));
        TcpStream::set_read_timeout(self, timeout)
    }

    fn timeout(&self) -> io::Result<Option<Duration>> {
        TcpStream::read_timeout(self)
    }

    fn probe(&mut self) -> io::Result<Liveness> {
        self.set_nonblocking(true)?;
        let mut byte = [0u8; 1];
        let peeked = self.peek(&mut byte);
        self.set_nonblocking(false)?;
        match peeked {
            Ok(0) => Ok(Liveness::Closed),
            Ok(_) => Ok(Liveness::Readable),
            Err(e) if e.kind() == ErrorKind::WouldBlock => Ok(Liveness::Idle),
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted | ErrorKind::NotConnected
                ) =>
            {
                Ok(Liveness::Closed)
            }
            Err(e) => Err(e),
        }
    }

    fn close(&mut self) {
        let _ = TcpStream::shutdown(self, Shutdown::Both);
    }
}
