// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status codes terminating every command exchange.

/// Message used for status 9; the peer sends no text for it.
pub const INVALID_LICENSE_MESSAGE: &str = "invalid license on the simulation station";

/// Message used for status 1; the peer sends no text for it.
pub const INVALID_ITEM_MESSAGE: &str = "invalid or deleted item";

/// The closed status taxonomy. Anything outside it is [`StatusCode::Unknown`]
/// and must be treated as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok,
    /// The call referenced a handle the peer does not know.
    InvalidItem,
    /// Followed by a line; the call still succeeded.
    Warning,
    /// Followed by a line carrying the error text.
    Error,
    InvalidLicense,
    Unknown(i32),
}

impl StatusCode {
    pub fn code(&self) -> i32 {
        match self {
            StatusCode::Ok => 0,
            StatusCode::InvalidItem => 1,
            StatusCode::Warning => 2,
            StatusCode::Error => 3,
            StatusCode::InvalidLicense => 9,
            StatusCode::Unknown(code) => *code,
        }
    }

    /// Whether a line-string message follows the code on the wire.
    pub fn carries_message(&self) -> bool {
        matches!(self, StatusCode::Warning | StatusCode::Error)
    }
}

impl From<i32> for StatusCode {
    fn from(code: i32) -> Self {
        match code {
            0 => StatusCode::Ok,
            1 => StatusCode::InvalidItem,
            2 => StatusCode::Warning,
            3 => StatusCode::Error,
            9 => StatusCode::InvalidLicense,
            other => StatusCode::Unknown(other),
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusCode::Ok => f.write_str("ok"),
            StatusCode::InvalidItem => f.write_str("invalid item"),
            StatusCode::Warning => f.write_str("warning"),
            StatusCode::Error => f.write_str("error"),
            StatusCode::InvalidLicense => f.write_str("invalid license"),
            StatusCode::Unknown(code) => write!(f, "unknown status {code}"),
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
