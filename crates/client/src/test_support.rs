// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted stand-in for a simulation station.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use std::io::{self, ErrorKind, Read};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::thread::JoinHandle;
use std::time::Duration;

use simlink_wire::handshake::{EVENT_SUBSCRIBE, GREETING, READY};
use simlink_wire::{BufferedTransport, Decoder, Encoder, HandshakeFlags, Transport, WireError};

use crate::config::LinkConfig;

const DRAIN_TIMEOUT: Duration = Duration::from_millis(250);

/// A localhost TCP peer that plays a fixed conversation per connection.
pub struct FakePeer {
    port: u16,
    worker: Option<JoinHandle<Result<(), WireError>>>,
}

impl FakePeer {
    /// Accept `sessions` connections one after another, running `script`
    /// on each with its index.
    pub fn serve<F>(sessions: usize, mut script: F) -> io::Result<Self>
    where
        F: FnMut(usize, &mut PeerSession) -> Result<(), WireError> + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let worker = std::thread::spawn(move || -> Result<(), WireError> {
            for index in 0..sessions {
                let (stream, _) = listener.accept()?;
                let mut session = PeerSession::new(stream)?;
                let result = script(index, &mut session);
                session.finish();
                result?;
            }
            Ok(())
        });
        Ok(Self { port, worker: Some(worker) })
    }

    /// Serve a single connection.
    pub fn once<F>(script: F) -> io::Result<Self>
    where
        F: FnOnce(&mut PeerSession) -> Result<(), WireError> + Send + 'static,
    {
        let mut script = Some(script);
        Self::serve(1, move |_, session| match script.take() {
            Some(script) => script(session),
            None => Ok(()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Config pointing at this peer, with short timeouts.
    pub fn config(&self) -> LinkConfig {
        LinkConfig {
            port: self.port,
            timeout_ms: 2_000,
            connect_timeout_ms: 1_000,
            ..LinkConfig::default()
        }
    }

    /// Wait for every session to finish and surface script failures.
    pub fn join(mut self) -> Result<(), WireError> {
        match self.worker.take().map(JoinHandle::join) {
            Some(Ok(result)) => result,
            Some(Err(_)) => Err(WireError::Io(io::Error::other("peer script panicked"))),
            None => Ok(()),
        }
    }
}

/// The peer side of one connection.
pub struct PeerSession {
    io: BufferedTransport<TcpStream>,
}

impl PeerSession {
    fn new(stream: TcpStream) -> Result<Self, WireError> {
        let mut io = BufferedTransport::new(stream);
        io.set_timeout(Some(Duration::from_secs(5)))?;
        Ok(Self { io })
    }

    /// Read the greeting and answer `READY`; returns the client's flags.
    pub fn handshake(&mut self) -> Result<HandshakeFlags, WireError> {
        let flags = self.read_greeting()?;
        self.put_line(READY)?;
        self.flush()?;
        Ok(flags)
    }

    /// Read the greeting and answer with anything but `READY`.
    pub fn reject(&mut self, reply: &str) -> Result<(), WireError> {
        self.read_greeting()?;
        self.put_line(reply)?;
        self.flush()
    }

    fn read_greeting(&mut self) -> Result<HandshakeFlags, WireError> {
        self.expect_line(GREETING)?;
        let line = self.get_line()?;
        let flags: Vec<i32> = line.split_whitespace().filter_map(|f| f.parse().ok()).collect();
        match flags.as_slice() {
            [safe_mode, auto_render] => {
                Ok(HandshakeFlags { safe_mode: *safe_mode != 0, auto_render: *auto_render != 0 })
            }
            _ => Err(unexpected("two handshake flags", &line)),
        }
    }

    /// Answer an event subscription.
    pub fn accept_subscription(&mut self, version: i32) -> Result<(), WireError> {
        self.expect_line(EVENT_SUBSCRIBE)?;
        let mode = self.get_i32()?;
        if mode != 0 {
            return Err(unexpected("subscription mode 0", &mode.to_string()));
        }
        self.put_line(EVENT_SUBSCRIBE)?;
        self.put_i32(version)?;
        self.put_i32(0)?;
        self.flush()
    }

    /// Read one line and require it to be `expected`.
    pub fn expect_line(&mut self, expected: &str) -> Result<(), WireError> {
        let line = self.get_line()?;
        if line != expected {
            return Err(unexpected(expected, &line));
        }
        Ok(())
    }

    /// Send status 0.
    pub fn ok(&mut self) -> Result<(), WireError> {
        self.put_i32(0)?;
        self.flush()
    }

    /// Send a status code, followed by `message` when given.
    pub fn status(&mut self, code: i32, message: Option<&str>) -> Result<(), WireError> {
        self.put_i32(code)?;
        if let Some(message) = message {
            self.put_line(message)?;
        }
        self.flush()
    }

    pub fn flush(&mut self) -> Result<(), WireError> {
        self.io.flush()
    }

    /// Block until the client hangs up.
    pub fn wait_closed(&mut self) -> Result<(), WireError> {
        let mut byte = [0u8; 1];
        loop {
            match self.io.read_exact(&mut byte) {
                Ok(()) => continue,
                Err(WireError::ConnectionClosed) => return Ok(()),
                Err(e) => return Err(e),
            }
        }
    }

    /// Flush, half-close, then drain so unread client bytes do not turn
    /// the close into a reset.
    fn finish(&mut self) {
        let _ = self.io.flush();
        let stream = self.io.get_mut();
        let _ = stream.shutdown(Shutdown::Write);
        let _ = stream.set_read_timeout(Some(DRAIN_TIMEOUT));
        let mut buf = [0u8; 512];
        while matches!(stream.read(&mut buf), Ok(n) if n > 0) {}
        stream.close();
    }
}

impl Encoder for PeerSession {
    fn put(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        self.io.write(bytes)
    }
}

impl Decoder for PeerSession {
    fn take(&mut self, buf: &mut [u8]) -> Result<(), WireError> {
        self.io.read_exact(buf)
    }

    fn take_line(&mut self) -> Result<String, WireError> {
        self.io.read_line()
    }
}

fn unexpected(expected: &str, got: &str) -> WireError {
    WireError::Io(io::Error::new(ErrorKind::InvalidData, format!("expected {expected:?}, got {got:?}")))
}
