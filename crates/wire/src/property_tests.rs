// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Property tests for codec round trips.
//!
//! Values are compared bit-for-bit: whatever the encoder writes, the
//! decoder must hand back unchanged, and must leave nothing behind.

use proptest::prelude::*;

use super::*;

fn arb_pose() -> impl Strategy<Value = Pose> {
    // Rotation about Z plus translation is always homogeneous
    (-std::f64::consts::PI..std::f64::consts::PI, prop::array::uniform3(-1e4f64..1e4)).prop_map(
        |(angle, xyz)| {
            let (s, c) = angle.sin_cos();
            Pose::from_rows([
                [c, -s, 0.0, xyz[0]],
                [s, c, 0.0, xyz[1]],
                [0.0, 0.0, 1.0, xyz[2]],
                [0.0, 0.0, 0.0, 1.0],
            ])
        },
    )
}

fn arb_matrix() -> impl Strategy<Value = Matrix> {
    (0usize..6, 0usize..8).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(any::<f64>(), rows * cols)
            .prop_map(move |data| Matrix::new(rows, cols, data).unwrap())
    })
}

fn bits(values: &[f64]) -> Vec<u64> {
    values.iter().map(|v| v.to_bits()).collect()
}

proptest! {
    #[test]
    fn int32_roundtrip(v in any::<i32>()) {
        let mut bytes = Vec::new();
        bytes.put_i32(v).unwrap();
        let mut stream = bytes.as_slice();
        prop_assert_eq!(stream.get_i32().unwrap(), v);
        prop_assert!(stream.is_empty());
    }

    #[test]
    fn int64_roundtrip(v in any::<i64>(), id in any::<u64>()) {
        let mut bytes = Vec::new();
        bytes.put_i64(v).unwrap();
        bytes.put_u64(id).unwrap();
        let mut stream = bytes.as_slice();
        prop_assert_eq!(stream.get_i64().unwrap(), v);
        prop_assert_eq!(stream.get_u64().unwrap(), id);
    }

    #[test]
    fn double_roundtrip_is_bit_exact(v in any::<f64>()) {
        let mut bytes = Vec::new();
        bytes.put_f64(v).unwrap();
        let mut stream = bytes.as_slice();
        prop_assert_eq!(stream.get_f64().unwrap().to_bits(), v.to_bits());
    }

    #[test]
    fn array_roundtrip(values in prop::collection::vec(any::<f64>(), 0..2000)) {
        let mut bytes = Vec::new();
        bytes.put_array(&values).unwrap();
        let mut stream = bytes.as_slice();
        let decoded = stream.get_array().unwrap();
        if values.is_empty() {
            prop_assert!(decoded.is_none());
        } else {
            prop_assert_eq!(bits(&decoded.unwrap()), bits(&values));
        }
        prop_assert!(stream.is_empty());
    }

    #[test]
    fn matrix_roundtrip(matrix in arb_matrix()) {
        let mut bytes = Vec::new();
        bytes.put_matrix(&matrix).unwrap();
        let mut stream = bytes.as_slice();
        let decoded = stream.get_matrix().unwrap();
        prop_assert_eq!(decoded.rows(), matrix.rows());
        prop_assert_eq!(decoded.cols(), matrix.cols());
        prop_assert_eq!(bits(decoded.col_major()), bits(matrix.col_major()));
    }

    #[test]
    fn pose_roundtrip(pose in arb_pose()) {
        let mut bytes = Vec::new();
        bytes.put_pose(&pose).unwrap();
        let mut stream = bytes.as_slice();
        let decoded = stream.get_pose().unwrap();
        prop_assert_eq!(bits(decoded.col_major()), bits(pose.col_major()));
    }

    #[test]
    fn line_roundtrip(text in "[^\n]{0,200}") {
        let mut bytes = Vec::new();
        bytes.put_line(&text).unwrap();
        let mut stream = bytes.as_slice();
        prop_assert_eq!(stream.get_line().unwrap(), text);
    }

    #[test]
    fn truncated_array_never_decodes(values in prop::collection::vec(-1e6f64..1e6, 1..64), cut in 1usize..8) {
        let mut bytes = Vec::new();
        bytes.put_array(&values).unwrap();
        bytes.truncate(bytes.len() - cut);
        let mut stream = bytes.as_slice();
        let err = stream.get_array().unwrap_err();
        prop_assert!(err.is_framing(), "unexpected error: {}", err);
    }
}
