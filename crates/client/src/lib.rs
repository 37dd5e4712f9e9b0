// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blocking client for a simulation station.
//!
//! A [`Client`] owns one handshaken command connection and runs
//! command/status exchanges on it, reconnecting when the link drops. An
//! [`EventChannel`] is a second connection subscribed to the station's
//! event feed.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod config;
mod connection;
pub mod env;
mod error;
mod events;
mod item;
pub mod launch;
mod protocol;
mod station;
mod timeout;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use client::{Args, Client, Reply};
pub use config::{ConfigError, LinkConfig, DEFAULT_PORT};
pub use connection::Connection;
pub use error::ClientError;
pub use events::{EventChannel, EventCloser, Events};
pub use item::{Item, ProgramReport, MAKE_PROGRAM_TIMEOUT};
pub use launch::LaunchError;
pub use protocol::{exchange, ArgWriter, Outcome, ReplyReader};
pub use station::{CollisionHit, Projection, StationVersion, COLLISION_SCAN_TIMEOUT, USER_PROMPT_TIMEOUT};
pub use timeout::TimeoutGuard;

pub use simlink_wire::{
    Event, EventKind, FeatureType, Handle, ItemType, KeyModifiers, Matrix, PathError, Pose,
    StatusCode, WireError, Xyz,
};
