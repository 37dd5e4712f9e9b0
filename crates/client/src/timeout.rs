// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped receive-timeout override.

use std::ops::{Deref, DerefMut};
use std::time::Duration;

use simlink_wire::{BufferedTransport, Transport, WireError};

/// Widens the receive timeout for one exchange; the previous value is
/// restored when the guard drops, whichever way the exchange ends.
pub struct TimeoutGuard<'a, T: Transport> {
    io: &'a mut BufferedTransport<T>,
    previous: Option<Duration>,
}

impl<'a, T: Transport> TimeoutGuard<'a, T> {
    pub fn extend(io: &'a mut BufferedTransport<T>, timeout: Duration) -> Result<Self, WireError> {
        let previous = io.timeout()?;
        io.set_timeout(Some(timeout))?;
        Ok(Self { io, previous })
    }

    /// Timeout that will be restored.
    pub fn previous(&self) -> Option<Duration> {
        self.previous
    }
}

impl<T: Transport> Deref for TimeoutGuard<'_, T> {
    type Target = BufferedTransport<T>;

    fn deref(&self) -> &Self::Target {
        self.io
    }
}

impl<T: Transport> DerefMut for TimeoutGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.io
    }
}

impl<T: Transport> Drop for TimeoutGuard<'_, T> {
    fn drop(&mut self) {
        if let Err(e) = self.io.set_timeout(self.previous) {
            tracing::warn!(error = %e, "failed to restore receive timeout");
        }
    }
}

#[cfg(test)]
#[path = "timeout_tests.rs"]
mod tests;
