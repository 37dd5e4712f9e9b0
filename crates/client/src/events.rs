// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subscribed event stream on a dedicated connection.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use simlink_wire::handshake::{self, EVENT_SUBSCRIBE};
use simlink_wire::{decode_event, Event, WireError};

use crate::client::Client;
use crate::config::LinkConfig;
use crate::connection::{Connection, ShutdownHandle};
use crate::error::ClientError;

const EVENT: &str = "event";

/// A connection subscribed to the station's event feed.
///
/// Runs beside the command connection and never carries commands.
#[derive(Debug)]
pub struct EventChannel {
    conn: Connection,
    closer: EventCloser,
    version: i32,
}

/// Closes an [`EventChannel`] from another thread, unblocking a pending
/// [`EventChannel::wait_for_event`].
#[derive(Debug, Clone)]
pub struct EventCloser {
    closed: Arc<AtomicBool>,
    handle: Arc<ShutdownHandle>,
}

impl EventCloser {
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            tracing::debug!("closing event channel");
        }
        self.handle.shutdown();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl EventChannel {
    /// Open a fresh connection and subscribe it.
    pub fn open(config: &LinkConfig) -> Result<Self, ClientError> {
        let mut conn = Connection::open(config)?;
        let io = conn.io();
        let reply = handshake::write_subscribe(io)
            .and_then(|()| handshake::read_subscribe_reply(io))
            .map_err(ClientError::wire(EVENT_SUBSCRIBE))?;
        if !reply.accepted() {
            conn.disconnect();
            return Err(ClientError::SubscribeRejected { status: reply.status });
        }
        let handle = conn.shutdown_handle().map_err(|e| ClientError::wire(EVENT_SUBSCRIBE)(WireError::Io(e)))?;
        tracing::info!(endpoint = %conn.endpoint(), version = reply.version, "subscribed to events");
        Ok(Self {
            conn,
            closer: EventCloser { closed: Arc::new(AtomicBool::new(false)), handle: Arc::new(handle) },
            version: reply.version,
        })
    }

    /// Subscribe to the station `client` talks to.
    pub fn for_client(client: &Client) -> Result<Self, ClientError> {
        Self::open(client.config())
    }

    /// Event protocol version announced by the station.
    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn closer(&self) -> EventCloser {
        self.closer.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closer.is_closed()
    }

    /// Wait up to `timeout` (forever when `None`) for the next event.
    ///
    /// `Ok(None)` means nothing arrived in time. Once the event has
    /// started arriving it is decoded with the connection's default
    /// timeout.
    pub fn wait_for_event(&mut self, timeout: Option<Duration>) -> Result<Option<Event>, ClientError> {
        if self.is_closed() {
            return Err(ClientError::ChannelClosed);
        }
        if !self.conn.is_alive() {
            return Err(ClientError::wire(EVENT)(WireError::ConnectionClosed));
        }
        match self.conn.io().wait_readable(timeout) {
            Ok(true) => {}
            Ok(false) => return Ok(None),
            Err(e) => return Err(self.fault(e)),
        }
        match decode_event(self.conn.io()) {
            Ok(event) => self.deliver(event),
            Err(e) => Err(self.fault(e)),
        }
    }

    /// Hand out a decoded event unless the channel was closed meanwhile.
    fn deliver(&self, event: Event) -> Result<Option<Event>, ClientError> {
        if self.is_closed() {
            tracing::debug!(?event, "event dropped, channel closed");
            return Err(ClientError::ChannelClosed);
        }
        tracing::debug!(?event, "event received");
        Ok(Some(event))
    }

    fn fault(&mut self, e: WireError) -> ClientError {
        if self.is_closed() {
            return ClientError::ChannelClosed;
        }
        if e.is_transport() || e.is_framing() {
            self.conn.mark_dead();
        }
        ClientError::wire(EVENT)(e)
    }

    /// Blocking iterator; ends once the channel is closed or lost.
    pub fn events(&mut self) -> Events<'_> {
        Events { channel: self, done: false }
    }

    pub fn close(&mut self) {
        self.closer.close();
        self.conn.disconnect();
    }
}

/// Iterator returned by [`EventChannel::events`].
pub struct Events<'a> {
    channel: &'a mut EventChannel,
    done: bool,
}

impl Iterator for Events<'_> {
    type Item = Result<Event, ClientError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.channel.wait_for_event(None) {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) | Err(ClientError::ChannelClosed) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = !self.channel.conn.is_alive();
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
