// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One handshaken TCP link to the simulation station.

use std::net::{Shutdown, TcpStream, ToSocketAddrs};

use simlink_wire::handshake::{self, GREETING};
use simlink_wire::{BufferedTransport, Liveness};

use crate::config::LinkConfig;
use crate::error::ClientError;
use crate::launch;

/// A connected, handshaken socket plus its buffers.
///
/// Exactly one exchange may be in flight; callers share a `Connection`
/// behind a mutex.
pub struct Connection {
    io: BufferedTransport<TcpStream>,
    endpoint: String,
    port: u16,
    alive: bool,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("endpoint", &self.endpoint)
            .field("alive", &self.alive)
            .finish_non_exhaustive()
    }
}

impl Connection {
    /// Connect to the first port of the range that completes a handshake,
    /// launching a local station once if none does.
    pub fn open(config: &LinkConfig) -> Result<Self, ClientError> {
        match Self::scan(config) {
            Ok(conn) => Ok(conn),
            Err(e) if config.launch && config.is_local() => {
                tracing::info!(error = %e, "no station reachable, launching one");
                launch::launch(config)?;
                Self::scan(config)
            }
            Err(e) => Err(e),
        }
    }

    fn scan(config: &LinkConfig) -> Result<Self, ClientError> {
        let mut last = None;
        for port in config.ports() {
            match Self::connect_port(config, port) {
                Ok(conn) => return Ok(conn),
                Err(e) => {
                    tracing::debug!(port, error = %e, "port unavailable");
                    last = Some(e);
                }
            }
        }
        Err(last.unwrap_or_else(|| ClientError::Unreachable {
            endpoint: config.host.clone(),
            reason: "empty port range".to_string(),
        }))
    }

    fn connect_port(config: &LinkConfig, port: u16) -> Result<Self, ClientError> {
        let endpoint = config.endpoint(port);
        let unreachable = |reason: String| ClientError::Unreachable { endpoint: endpoint.clone(), reason };

        let addrs = (config.host.as_str(), port)
            .to_socket_addrs()
            .map_err(|e| unreachable(e.to_string()))?;
        let mut failure = "no address resolved".to_string();
        let mut stream = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, config.connect_timeout()) {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => failure = e.to_string(),
            }
        }
        let stream = stream.ok_or_else(|| unreachable(failure))?;
        // Requests are coalesced in the send buffer already
        let _ = stream.set_nodelay(true);

        let mut io = BufferedTransport::new(stream);
        io.set_timeout(Some(config.timeout())).map_err(ClientError::wire(GREETING))?;

        let reply = handshake::write_greeting(&mut io, config.flags())
            .and_then(|()| handshake::read_ready(&mut io));
        match reply {
            Ok(Ok(())) => {
                tracing::info!(endpoint = %endpoint, "connected");
                Ok(Self { io, endpoint, port, alive: true })
            }
            Ok(Err(reply)) => {
                io.close();
                Err(ClientError::HandshakeRejected { endpoint, reply })
            }
            Err(e) => {
                io.close();
                Err(unreachable(format!("handshake failed: {e}")))
            }
        }
    }

    /// Non-blocking liveness check. A readable socket with nothing to read
    /// means the peer is closing.
    pub fn is_connected(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        match self.io.probe() {
            Ok(Liveness::Idle | Liveness::Readable) => true,
            Ok(Liveness::Closed) | Err(_) => {
                tracing::debug!(endpoint = %self.endpoint, "peer went away");
                self.alive = false;
                false
            }
        }
    }

    /// Whether the stream is still trusted; no syscall.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Stop trusting the stream after a transport or framing fault.
    pub fn mark_dead(&mut self) {
        if self.alive {
            tracing::warn!(endpoint = %self.endpoint, "dropping connection");
        }
        self.disconnect();
    }

    /// Idempotent; safe on a socket the peer already closed.
    pub fn disconnect(&mut self) {
        if self.alive {
            tracing::debug!(endpoint = %self.endpoint, "disconnecting");
        }
        self.alive = false;
        self.io.close();
    }

    pub fn io(&mut self) -> &mut BufferedTransport<TcpStream> {
        &mut self.io
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// A second handle on the socket, used to shut it down from another
    /// thread while a read is blocked.
    pub(crate) fn shutdown_handle(&self) -> std::io::Result<ShutdownHandle> {
        self.io.get_ref().try_clone().map(ShutdownHandle)
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.disconnect();
    }
}

#[derive(Debug)]
pub(crate) struct ShutdownHandle(TcpStream);

impl ShutdownHandle {
    pub(crate) fn shutdown(&self) {
        let _ = self.0.shutdown(Shutdown::Both);
    }
}

#[cfg(test)]
#[path = "connection_tests.rs"]
mod tests;
