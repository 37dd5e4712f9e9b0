// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    clean = { 0, PathError::None },
    joint_limits = { 3, PathError::JointLimits },
    out_of_reach = { 20, PathError::TargetOutOfReach },
    singularity = { 100, PathError::Singularity },
    wrist = { 1_000, PathError::WristSingularity },
    collision = { 10_000, PathError::Collision },
    near_singularity = { 100_000, PathError::NearSingularity },
    flip_axis = { 1_000_000, PathError::FlipAxis },
    highest_digit_wins = { 1_010_001, PathError::FlipAxis },
    collision_over_limits = { 10_005, PathError::Collision },
    wraps_above_table = { 10_000_000, PathError::None },
    negative = { -5, PathError::None },
)]
fn packed_codes(code: i32, expected: PathError) {
    assert_eq!(PathError::from_code(code), expected);
}

#[test]
fn only_none_is_not_an_error() {
    assert!(!PathError::None.is_error());
    assert!(PathError::Collision.is_error());
}
