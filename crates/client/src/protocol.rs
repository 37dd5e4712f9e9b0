// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One command/status exchange.
//!
//! A request is the command line followed by its arguments; the response
//! is the command's return values followed by an `int32` status. The two
//! halves are written by [`ArgWriter`] and read by [`ReplyReader`], so a
//! closure encoding arguments cannot read and vice versa.

use simlink_wire::{BufferedTransport, Decoder, Encoder, StatusCode, Transport, WireError};

use crate::error::ClientError;

/// Argument phase of an exchange.
pub struct ArgWriter<'a, T: Transport> {
    io: &'a mut BufferedTransport<T>,
}

impl<T: Transport> Encoder for ArgWriter<'_, T> {
    fn put(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        self.io.write(bytes)
    }
}

/// Return-value phase of an exchange.
pub struct ReplyReader<'a, T: Transport> {
    io: &'a mut BufferedTransport<T>,
}

impl<T: Transport> Decoder for ReplyReader<'_, T> {
    fn take(&mut self, buf: &mut [u8]) -> Result<(), WireError> {
        self.io.read_exact(buf)
    }

    fn take_line(&mut self) -> Result<String, WireError> {
        self.io.read_line()
    }
}

/// A successful exchange: the decoded values and, for status 2, the
/// warning text.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<R> {
    pub value: R,
    pub warning: Option<String>,
}

/// Run one exchange on `io`.
///
/// A local encoding failure before any byte left the process leaves the
/// stream aligned and yields [`ClientError::InvalidArgument`]; every other
/// wire failure means the stream can no longer be trusted.
pub fn exchange<T, R, S, V>(
    io: &mut BufferedTransport<T>,
    command: &str,
    send: S,
    receive: V,
) -> Result<Outcome<R>, ClientError>
where
    T: Transport,
    S: FnOnce(&mut ArgWriter<'_, T>) -> Result<(), WireError>,
    V: FnOnce(&mut ReplyReader<'_, T>) -> Result<R, WireError>,
{
    io.begin_frame();
    let sent = io.put_line(command).and_then(|()| send(&mut ArgWriter { io: &mut *io }));
    if let Err(source) = sent {
        if source.is_local() && io.abandon_frame() {
            return Err(ClientError::InvalidArgument { command: command.to_string(), source });
        }
        return Err(ClientError::wire(command)(source));
    }

    let value = receive(&mut ReplyReader { io: &mut *io }).map_err(ClientError::wire(command))?;
    let status = StatusCode::from(io.get_i32().map_err(ClientError::wire(command))?);
    match status {
        StatusCode::Ok => Ok(Outcome { value, warning: None }),
        StatusCode::Warning => {
            let message = io.get_line().map_err(ClientError::wire(command))?;
            tracing::warn!(command, message = %message, "station warning");
            Ok(Outcome { value, warning: Some(message) })
        }
        StatusCode::Error => {
            let message = io.get_line().map_err(ClientError::wire(command))?;
            Err(ClientError::Remote { command: command.to_string(), message })
        }
        StatusCode::InvalidItem => Err(ClientError::InvalidItem { command: command.to_string() }),
        StatusCode::InvalidLicense => {
            Err(ClientError::InvalidLicense { command: command.to_string() })
        }
        StatusCode::Unknown(code) => {
            Err(ClientError::UnknownStatus { command: command.to_string(), code })
        }
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
