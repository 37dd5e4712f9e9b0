// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    frame = { "frame", ItemType::Frame },
    robot_upper = { "ROBOT", ItemType::Robot },
    target = { "target", ItemType::Target },
    robot_arm = { "robot-arm", ItemType::RobotArm },
)]
fn item_type_names_parse(name: &str, expected: ItemType) {
    assert_eq!(parse_item_type(name).unwrap(), expected);
}

#[test]
fn unknown_item_type_is_rejected() {
    assert_eq!(parse_item_type("spaceship").unwrap_err(), "unknown item type 'spaceship'");
}
