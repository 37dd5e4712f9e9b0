// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared handle on a command connection.

use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use simlink_wire::WireError;

use crate::config::LinkConfig;
use crate::connection::Connection;
use crate::error::ClientError;
use crate::protocol::{self, ArgWriter, ReplyReader};
use crate::timeout::TimeoutGuard;

/// Argument encoder handed to [`Client::call`] closures.
pub type Args<'a> = ArgWriter<'a, TcpStream>;

/// Return-value decoder handed to [`Client::call`] closures.
pub type Reply<'a> = ReplyReader<'a, TcpStream>;

/// Command connection to the simulation station.
///
/// Cheap to clone; clones share one connection and take turns on it. Use
/// [`Client::fork`] for an independent connection that can run calls in
/// parallel.
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

struct Inner {
    config: LinkConfig,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    conn: Option<Connection>,
    last_status: String,
    /// Receive timeout set through `set_timeout`; survives reconnects.
    timeout: Option<Duration>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("host", &self.inner.config.host)
            .field("ports", &self.inner.config.ports())
            .finish()
    }
}

impl Client {
    /// Connect and handshake; see [`Connection::open`].
    pub fn connect(config: LinkConfig) -> Result<Self, ClientError> {
        let conn = Connection::open(&config)?;
        Ok(Self::with_connection(config, conn))
    }

    /// Defer connecting to the first call.
    pub fn lazy(config: LinkConfig) -> Self {
        Self { inner: Arc::new(Inner { config, state: Mutex::new(State::default()) }) }
    }

    fn with_connection(config: LinkConfig, conn: Connection) -> Self {
        let state = State { conn: Some(conn), ..State::default() };
        Self { inner: Arc::new(Inner { config, state: Mutex::new(state) }) }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.inner.config
    }

    /// A second, independently handshaken connection to the same station.
    pub fn fork(&self) -> Result<Self, ClientError> {
        Self::connect(self.inner.config.clone())
    }

    /// `host:port` of the current connection, if any.
    pub fn endpoint(&self) -> Option<String> {
        self.inner.state.lock().conn.as_ref().map(|c| c.endpoint().to_string())
    }

    pub fn is_connected(&self) -> bool {
        self.inner.state.lock().conn.as_mut().is_some_and(Connection::is_connected)
    }

    /// Reconnect once if the link is down.
    pub fn ensure_connected(&self) -> Result<(), ClientError> {
        let mut state = self.inner.state.lock();
        let State { conn, timeout, .. } = &mut *state;
        ensure(conn, &self.inner.config, *timeout).map(|_| ())
    }

    /// Close the link; the next call reconnects.
    pub fn disconnect(&self) {
        if let Some(mut conn) = self.inner.state.lock().conn.take() {
            conn.disconnect();
        }
    }

    /// Warning or error text from the most recent call; empty when it
    /// finished with status 0.
    pub fn last_status_message(&self) -> String {
        self.inner.state.lock().last_status.clone()
    }

    /// Current receive timeout of the live connection.
    pub fn timeout(&self) -> Option<Duration> {
        let mut state = self.inner.state.lock();
        let conn = state.conn.as_mut()?;
        conn.io().timeout().ok().flatten()
    }

    /// Replace the default receive timeout. The value is re-applied to
    /// every connection this client opens afterwards.
    pub fn set_timeout(&self, timeout: Duration) -> Result<(), ClientError> {
        let mut state = self.inner.state.lock();
        state.timeout = Some(timeout);
        let conn = ensure(&mut state.conn, &self.inner.config, Some(timeout))?;
        conn.io().set_timeout(Some(timeout)).map_err(ClientError::wire("set_timeout"))
    }

    /// Run one command exchange with the default timeout.
    ///
    /// `send` encodes the arguments, `receive` decodes the return values.
    pub fn call<R, S, V>(&self, command: &str, send: S, receive: V) -> Result<R, ClientError>
    where
        S: FnOnce(&mut Args<'_>) -> Result<(), WireError>,
        V: FnOnce(&mut Reply<'_>) -> Result<R, WireError>,
    {
        self.run(command, None, send, receive)
    }

    /// Like [`Client::call`], with the receive timeout widened for this
    /// exchange only.
    pub fn call_with_timeout<R, S, V>(
        &self,
        command: &str,
        timeout: Duration,
        send: S,
        receive: V,
    ) -> Result<R, ClientError>
    where
        S: FnOnce(&mut Args<'_>) -> Result<(), WireError>,
        V: FnOnce(&mut Reply<'_>) -> Result<R, WireError>,
    {
        self.run(command, Some(timeout), send, receive)
    }

    fn run<R, S, V>(
        &self,
        command: &str,
        timeout: Option<Duration>,
        send: S,
        receive: V,
    ) -> Result<R, ClientError>
    where
        S: FnOnce(&mut Args<'_>) -> Result<(), WireError>,
        V: FnOnce(&mut Reply<'_>) -> Result<R, WireError>,
    {
        let mut guard = self.inner.state.lock();
        let State { conn, last_status, timeout: default_timeout } = &mut *guard;
        last_status.clear();
        let conn = ensure(conn, &self.inner.config, *default_timeout)?;

        let result = match timeout {
            Some(timeout) => match TimeoutGuard::extend(conn.io(), timeout) {
                Ok(mut io) => protocol::exchange(&mut *io, command, send, receive),
                Err(e) => Err(ClientError::wire(command)(e)),
            },
            None => protocol::exchange(conn.io(), command, send, receive),
        };

        match &result {
            Ok(outcome) => {
                if let Some(warning) = &outcome.warning {
                    last_status.clone_from(warning);
                }
            }
            Err(ClientError::Remote { message, .. }) => last_status.clone_from(message),
            Err(e) if e.poisons_connection() => {
                tracing::warn!(command, error = %e, "exchange failed");
                conn.mark_dead();
            }
            Err(_) => {}
        }
        result.map(|outcome| outcome.value)
    }
}

fn ensure<'a>(
    slot: &'a mut Option<Connection>,
    config: &LinkConfig,
    timeout: Option<Duration>,
) -> Result<&'a mut Connection, ClientError> {
    let alive = slot.as_mut().is_some_and(Connection::is_connected);
    if !alive {
        if let Some(mut stale) = slot.take() {
            stale.disconnect();
            tracing::info!(endpoint = %stale.endpoint(), "reconnecting");
        }
        let conn = Connection::open(config).map_err(|e| {
            tracing::warn!(error = %e, "reconnect failed");
            match e {
                ClientError::Unreachable { .. } | ClientError::Launch(_) => e,
                other => ClientError::Unreachable {
                    endpoint: config.endpoint(config.port),
                    reason: other.to_string(),
                },
            }
        })?;
        let conn = slot.insert(conn);
        if let Some(timeout) = timeout {
            conn.io().set_timeout(Some(timeout)).map_err(ClientError::wire("set_timeout"))?;
        }
        return Ok(conn);
    }
    slot.as_mut().ok_or_else(|| ClientError::Unreachable {
        endpoint: config.endpoint(config.port),
        reason: "not connected".to_string(),
    })
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
