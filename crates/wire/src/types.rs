// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Value types carried by the codec.

use serde::{Deserialize, Serialize};

use crate::WireError;

/// A point or direction: three doubles on the wire.
pub type Xyz = [f64; 3];

/// Kind of remote object a [`Handle`] names, as reported by the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ItemType {
    Any,
    Station,
    Robot,
    Frame,
    Tool,
    Object,
    Target,
    Program,
    Instruction,
    ProgramScript,
    Machining,
    BallbarValidation,
    CalibrationProject,
    Iso9283Validation,
    Folder,
    RobotArm,
    Camera,
    Generic,
    RobotAxes,
    Notes,
    /// A tag this client does not know by name.
    Other(i32),
}

const ITEM_TYPE_TABLE: &[(i32, ItemType)] = &[
    (-1, ItemType::Any),
    (1, ItemType::Station),
    (2, ItemType::Robot),
    (3, ItemType::Frame),
    (4, ItemType::Tool),
    (5, ItemType::Object),
    (6, ItemType::Target),
    (8, ItemType::Program),
    (9, ItemType::Instruction),
    (10, ItemType::ProgramScript),
    (11, ItemType::Machining),
    (12, ItemType::BallbarValidation),
    (13, ItemType::CalibrationProject),
    (14, ItemType::Iso9283Validation),
    (17, ItemType::Folder),
    (18, ItemType::RobotArm),
    (19, ItemType::Camera),
    (20, ItemType::Generic),
    (21, ItemType::RobotAxes),
    (22, ItemType::Notes),
];

impl ItemType {
    /// Parse a lowercase name as used on the command line (`frame`, `robot`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        ITEM_TYPE_TABLE.iter().map(|(_, kind)| *kind).find(|kind| kind.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemType::Any => "any",
            ItemType::Station => "station",
            ItemType::Robot => "robot",
            ItemType::Frame => "frame",
            ItemType::Tool => "tool",
            ItemType::Object => "object",
            ItemType::Target => "target",
            ItemType::Program => "program",
            ItemType::Instruction => "instruction",
            ItemType::ProgramScript => "script",
            ItemType::Machining => "machining",
            ItemType::BallbarValidation => "ballbar",
            ItemType::CalibrationProject => "calibration",
            ItemType::Iso9283Validation => "iso9283",
            ItemType::Folder => "folder",
            ItemType::RobotArm => "robot-arm",
            ItemType::Camera => "camera",
            ItemType::Generic => "generic",
            ItemType::RobotAxes => "robot-axes",
            ItemType::Notes => "notes",
            ItemType::Other(_) => "other",
        }
    }
}

impl From<i32> for ItemType {
    fn from(tag: i32) -> Self {
        ITEM_TYPE_TABLE
            .iter()
            .find(|(code, _)| *code == tag)
            .map(|(_, kind)| *kind)
            .unwrap_or(ItemType::Other(tag))
    }
}

impl From<ItemType> for i32 {
    fn from(kind: ItemType) -> Self {
        match kind {
            ItemType::Other(tag) => tag,
            known => ITEM_TYPE_TABLE
                .iter()
                .find(|(_, kind)| *kind == known)
                .map(|(code, _)| *code)
                .unwrap_or(-1),
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemType::Other(tag) => write!(f, "other({tag})"),
            known => f.write_str(known.name()),
        }
    }
}

/// Opaque reference to an object living in the peer.
///
/// The id is only ever sent back verbatim. There is no client-side
/// lifetime: a handle whose object was deleted stays a valid value here
/// and fails on the next call that uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle {
    pub id: u64,
    /// Type tag cached from the last receive; never sent.
    pub kind: ItemType,
}

impl Handle {
    /// The "no object" handle.
    pub const NULL: Handle = Handle { id: 0, kind: ItemType::Any };

    pub fn new(id: u64, kind: ItemType) -> Self {
        Self { id, kind }
    }

    pub fn is_null(&self) -> bool {
        self.id == 0
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::NULL
    }
}

const ROTATION_TOLERANCE: f64 = 1e-4;
const BOTTOM_ROW_TOLERANCE: f64 = 1e-6;

/// 4x4 homogeneous transform, stored column-major as it travels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    values: [f64; 16],
}

impl Pose {
    pub fn identity() -> Self {
        let mut values = [0.0; 16];
        for i in 0..4 {
            values[i * 4 + i] = 1.0;
        }
        Self { values }
    }

    pub fn from_translation(xyz: Xyz) -> Self {
        let mut pose = Self::identity();
        pose.values[12..15].copy_from_slice(&xyz);
        pose
    }

    /// Build from row-major rows, the way poses are usually written down.
    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        let mut values = [0.0; 16];
        for (r, row) in rows.iter().enumerate() {
            for (c, v) in row.iter().enumerate() {
                values[c * 4 + r] = *v;
            }
        }
        Self { values }
    }

    pub fn from_col_major(values: [f64; 16]) -> Self {
        Self { values }
    }

    pub fn col_major(&self) -> &[f64; 16] {
        &self.values
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[col * 4 + row]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.values[col * 4 + row] = value;
    }

    pub fn translation(&self) -> Xyz {
        [self.values[12], self.values[13], self.values[14]]
    }

    pub fn is_homogeneous(&self) -> bool {
        self.validate().is_ok()
    }

    /// Check the bottom row is `[0 0 0 1]` and the rotation block is orthonormal.
    pub fn validate(&self) -> Result<(), WireError> {
        if let Some(v) = self.values.iter().find(|v| !v.is_finite()) {
            return Err(WireError::InvalidPose(format!("non-finite element {v}")));
        }
        let bottom = [self.get(3, 0), self.get(3, 1), self.get(3, 2), self.get(3, 3)];
        let expected = [0.0, 0.0, 0.0, 1.0];
        if bottom.iter().zip(expected).any(|(a, b)| (a - b).abs() > BOTTOM_ROW_TOLERANCE) {
            return Err(WireError::InvalidPose(format!("bottom row is {bottom:?}")));
        }
        // R * R^T must be the identity
        let mut error = 0.0;
        for i in 0..3 {
            for j in 0..3 {
                let dot: f64 = (0..3).map(|k| self.get(i, k) * self.get(j, k)).sum();
                let target = if i == j { 1.0 } else { 0.0 };
                error += (dot - target).abs();
            }
        }
        if error > ROTATION_TOLERANCE {
            return Err(WireError::InvalidPose(format!(
                "rotation is not orthonormal (error {error:.2e})"
            )));
        }
        Ok(())
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

/// Dense matrix of doubles, column-major.
///
/// Point lists travel as 3xN (or 6xN with normals) matrices where each
/// column is one point.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, WireError> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(WireError::InvalidMatrix(format!(
                "{rows}x{cols} needs {} values, got {}",
                rows.saturating_mul(cols),
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Build from columns of equal length.
    pub fn from_columns<C: AsRef<[f64]>>(columns: &[C]) -> Result<Self, WireError> {
        let rows = columns.first().map(|c| c.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows * columns.len());
        for (j, column) in columns.iter().enumerate() {
            let column = column.as_ref();
            if column.len() != rows {
                return Err(WireError::InvalidMatrix(format!(
                    "column {j} has {} values, expected {rows}",
                    column.len()
                )));
            }
            data.extend_from_slice(column);
        }
        Self::new(rows, columns.len(), data)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(col * self.rows + row).copied()
    }

    pub fn column(&self, col: usize) -> Option<&[f64]> {
        if col >= self.cols {
            return None;
        }
        Some(&self.data[col * self.rows..(col + 1) * self.rows])
    }

    pub fn columns(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.cols).filter_map(move |c| self.column(c))
    }

    pub fn col_major(&self) -> &[f64] {
        &self.data
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
