// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client-level errors.

use simlink_wire::{WireError, INVALID_ITEM_MESSAGE, INVALID_LICENSE_MESSAGE};
use thiserror::Error;

use crate::launch::LaunchError;

/// The one error kind raised to callers.
///
/// Call-level variants carry the command name of the exchange that
/// failed, which identifies the originating call site.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport or framing fault; the connection has been dropped.
    #[error("{command}: {source}")]
    Wire {
        command: String,
        #[source]
        source: WireError,
    },

    /// An argument failed validation before anything was sent.
    #[error("{command}: invalid argument: {source}")]
    InvalidArgument {
        command: String,
        #[source]
        source: WireError,
    },

    /// Status 1: the call referenced an unknown or deleted item.
    #[error("{command}: {}", INVALID_ITEM_MESSAGE)]
    InvalidItem { command: String },

    /// Status 3: the peer reported an error.
    #[error("{command}: {message}")]
    Remote { command: String, message: String },

    /// Status 9.
    #[error("{command}: {}", INVALID_LICENSE_MESSAGE)]
    InvalidLicense { command: String },

    /// A status outside the known taxonomy; the stream is considered lost.
    #[error("{command}: unknown status code {code}")]
    UnknownStatus { command: String, code: i32 },

    #[error("cannot reach simulation station at {endpoint}: {reason}")]
    Unreachable { endpoint: String, reason: String },

    #[error("handshake rejected by {endpoint}: got {reply:?}")]
    HandshakeRejected { endpoint: String, reply: String },

    #[error("event subscription rejected (status {status})")]
    SubscribeRejected { status: i32 },

    #[error("event channel closed")]
    ChannelClosed,

    #[error(transparent)]
    Launch(#[from] LaunchError),
}

impl ClientError {
    pub(crate) fn wire(command: &str) -> impl FnOnce(WireError) -> ClientError + '_ {
        move |source| ClientError::Wire { command: command.to_string(), source }
    }

    /// Name of the command whose exchange failed, if any.
    pub fn command(&self) -> Option<&str> {
        match self {
            ClientError::Wire { command, .. }
            | ClientError::InvalidArgument { command, .. }
            | ClientError::InvalidItem { command }
            | ClientError::Remote { command, .. }
            | ClientError::InvalidLicense { command }
            | ClientError::UnknownStatus { command, .. } => Some(command),
            _ => None,
        }
    }

    /// Whether the stream can no longer be trusted after this error.
    pub fn poisons_connection(&self) -> bool {
        matches!(self, ClientError::Wire { .. } | ClientError::UnknownStatus { .. })
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
