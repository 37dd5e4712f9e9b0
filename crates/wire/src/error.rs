// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised while moving values across the wire.

use thiserror::Error;

/// Transport and framing faults.
///
/// Every variant is fatal to the exchange in progress. Callers that own a
/// connection should treat it as dead after any of them; see
/// [`WireError::is_transport`] and [`WireError::is_framing`].
#[derive(Debug, Error)]
pub enum WireError {
    /// The peer closed the stream (zero-byte read).
    #[error("connection closed by peer")]
    ConnectionClosed,

    /// No data arrived within the receive timeout.
    #[error("timed out waiting for peer")]
    Timeout,

    /// The socket accepted fewer bytes than one flush handed it.
    #[error("short send: peer accepted {sent} of {expected} bytes")]
    ShortSend { sent: usize, expected: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before a field whose size was declared up front.
    #[error("truncated {field}: expected {expected} bytes")]
    Truncated { field: &'static str, expected: usize },

    /// A declared length or count was negative or otherwise unusable.
    #[error("invalid length for {field}: {len}")]
    InvalidLength { field: &'static str, len: i64 },

    /// A received line was not valid UTF-8.
    #[error("line is not valid utf-8")]
    InvalidUtf8,

    /// A pose failed validation before send.
    #[error("pose is not a homogeneous transform: {0}")]
    InvalidPose(String),

    /// A matrix shape does not fit the wire's `int32` dimensions or its data.
    #[error("invalid matrix: {0}")]
    InvalidMatrix(String),

    /// An event payload decoded cleanly but its content is unusable.
    #[error("invalid {event} payload: {reason}")]
    InvalidEvent { event: &'static str, reason: String },
}

impl WireError {
    /// Socket-level faults: reset, timeout, closed, short send.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            WireError::ConnectionClosed
                | WireError::Timeout
                | WireError::ShortSend { .. }
                | WireError::Io(_)
        )
    }

    /// Faults that leave the stream at an unknown offset.
    pub fn is_framing(&self) -> bool {
        matches!(
            self,
            WireError::Truncated { .. } | WireError::InvalidLength { .. } | WireError::InvalidUtf8
        )
    }

    /// Faults raised locally before any byte of the offending value is sent.
    pub fn is_local(&self) -> bool {
        matches!(self, WireError::InvalidPose(_) | WireError::InvalidMatrix(_))
    }

    /// Re-label an end-of-stream inside a declared-length field as truncation.
    pub(crate) fn truncated(self, field: &'static str, expected: usize) -> Self {
        match self {
            WireError::ConnectionClosed => WireError::Truncated { field, expected },
            other => other,
        }
    }
}

/// Map an I/O error from a send or receive onto the transport taxonomy.
pub(crate) fn from_io(err: std::io::Error) -> WireError {
    use std::io::ErrorKind;
    match err.kind() {
        ErrorKind::WouldBlock | ErrorKind::TimedOut => WireError::Timeout,
        ErrorKind::UnexpectedEof
        | ErrorKind::ConnectionReset
        | ErrorKind::ConnectionAborted
        | ErrorKind::BrokenPipe => WireError::ConnectionClosed,
        _ => WireError::Io(err),
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
