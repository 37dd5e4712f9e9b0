// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    ok = { 0, StatusCode::Ok, false },
    invalid_item = { 1, StatusCode::InvalidItem, false },
    warning = { 2, StatusCode::Warning, true },
    error = { 3, StatusCode::Error, true },
    license = { 9, StatusCode::InvalidLicense, false },
    four = { 4, StatusCode::Unknown(4), false },
    negative = { -1, StatusCode::Unknown(-1), false },
    large = { 100, StatusCode::Unknown(100), false },
)]
fn status_taxonomy(code: i32, status: StatusCode, message: bool) {
    assert_eq!(StatusCode::from(code), status);
    assert_eq!(status.code(), code);
    assert_eq!(status.carries_message(), message);
}

#[test]
fn unknown_status_display_names_the_code() {
    assert_eq!(StatusCode::Unknown(42).to_string(), "unknown status 42");
    assert_eq!(StatusCode::Warning.to_string(), "warning");
}
