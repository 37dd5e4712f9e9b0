// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire layer for talking to a simulation station.
//!
//! Wire format: fixed-width big-endian fields with no envelope. A request
//! is a command line followed by its arguments; a response is the
//! command's return values followed by an `int32` status.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod buffer;
mod codec;
mod error;
mod event;
pub mod handshake;
mod path_error;
mod status;
mod transport;
mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use buffer::{BufferedTransport, DEFAULT_CAPACITY, MAX_LINE, MTU};
pub use codec::{Decoder, Encoder};
pub use error::WireError;
pub use event::{decode_event, Event, EventKind, FeatureType, KeyModifiers};
pub use handshake::HandshakeFlags;
pub use path_error::PathError;
pub use status::{StatusCode, INVALID_ITEM_MESSAGE, INVALID_LICENSE_MESSAGE};
pub use transport::{Liveness, Transport};
pub use types::{Handle, ItemType, Matrix, Pose, Xyz};

#[cfg(test)]
mod property_tests;
