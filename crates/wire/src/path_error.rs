// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Decoding of packed path-simulation error codes.
//!
//! Movement checks return a single integer in which each decimal digit
//! group flags one class of problem. The thresholds below are the peer's
//! constant table and are reproduced as-is; the first matching row wins.
//!
//! This is a standalone decoding table. No exchange in this crate returns a
//! packed code; callers that read one through `Client::call` decode it here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathError {
    None,
    /// A rotation close to 180 degrees leaves the axis undefined.
    FlipAxis,
    /// The path passes too close to a singularity.
    NearSingularity,
    Collision,
    /// Joint 5 crosses zero during a linear move.
    WristSingularity,
    Singularity,
    TargetOutOfReach,
    JointLimits,
}

/// `(modulus, threshold, kind)`: the code matches when `code % modulus > threshold`.
const PATH_ERROR_TABLE: &[(i64, i64, PathError)] = &[
    (10_000_000, 999_999, PathError::FlipAxis),
    (1_000_000, 99_999, PathError::NearSingularity),
    (100_000, 9_999, PathError::Collision),
    (10_000, 999, PathError::WristSingularity),
    (1_000, 99, PathError::Singularity),
    (100, 9, PathError::TargetOutOfReach),
    (10, 0, PathError::JointLimits),
];

impl PathError {
    pub fn from_code(code: i32) -> Self {
        let code = i64::from(code);
        PATH_ERROR_TABLE
            .iter()
            .find(|(modulus, threshold, _)| code % modulus > *threshold)
            .map(|(_, _, kind)| *kind)
            .unwrap_or(PathError::None)
    }

    pub fn is_error(&self) -> bool {
        *self != PathError::None
    }
}

#[cfg(test)]
#[path = "path_error_tests.rs"]
mod tests;
