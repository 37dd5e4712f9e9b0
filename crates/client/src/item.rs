// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Item-level commands.

use std::path::Path;
use std::time::Duration;

use simlink_wire::{Decoder, Encoder, Handle, ItemType, Matrix, Pose, WireError};

use crate::client::Client;
use crate::error::ClientError;

/// Program generation can take minutes on large programs.
pub const MAKE_PROGRAM_TIMEOUT: Duration = Duration::from_secs(300);

/// A station-side object, addressed by handle through its owning client.
///
/// The handle is not refreshed: after the object is deleted on the
/// station, calls fail with [`ClientError::InvalidItem`].
#[derive(Debug, Clone)]
pub struct Item {
    handle: Handle,
    client: Client,
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.handle.id == other.handle.id
    }
}

impl Eq for Item {}

/// Result of generating a program file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramReport {
    /// Number of instructions written; zero or negative on failure.
    pub code: i32,
    pub log: String,
}

impl ProgramReport {
    pub fn succeeded(&self) -> bool {
        self.code > 0
    }
}

impl Item {
    pub fn new(client: Client, handle: Handle) -> Self {
        Self { handle, client }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn id(&self) -> u64 {
        self.handle.id
    }

    /// Type reported when the handle was received.
    pub fn kind(&self) -> ItemType {
        self.handle.kind
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Local check only: a zero handle never names an item.
    pub fn is_valid(&self) -> bool {
        !self.handle.is_null()
    }

    fn wrap(&self, handle: Handle) -> Item {
        Item::new(self.client.clone(), handle)
    }

    pub fn name(&self) -> Result<String, ClientError> {
        let handle = self.handle;
        self.client.call("G_Name", |a| a.put_handle(&handle), |r| r.get_line())
    }

    pub fn set_name(&self, name: &str) -> Result<(), ClientError> {
        let handle = self.handle;
        self.client.call(
            "S_Name",
            |a| {
                a.put_handle(&handle)?;
                a.put_line(name)
            },
            |_| Ok(()),
        )
    }

    /// Type as the station currently reports it.
    pub fn item_type(&self) -> Result<ItemType, ClientError> {
        let handle = self.handle;
        self.client.call("G_Item_Type", |a| a.put_handle(&handle), |r| r.get_i32().map(ItemType::from))
    }

    pub fn parent(&self) -> Result<Item, ClientError> {
        let handle = self.handle;
        let parent = self.client.call("G_Parent", |a| a.put_handle(&handle), |r| r.get_handle())?;
        Ok(self.wrap(parent))
    }

    pub fn children(&self) -> Result<Vec<Item>, ClientError> {
        let handle = self.handle;
        let handles = self.client.call(
            "G_Childs",
            |a| a.put_handle(&handle),
            |r| {
                let count = r.get_count("child count")?;
                (0..count).map(|_| r.get_handle()).collect::<Result<Vec<_>, WireError>>()
            },
        )?;
        Ok(handles.into_iter().map(|h| self.wrap(h)).collect())
    }

    /// Pose relative to the parent.
    pub fn pose(&self) -> Result<Pose, ClientError> {
        self.get_pose("G_Hlocal")
    }

    pub fn set_pose(&self, pose: &Pose) -> Result<(), ClientError> {
        self.put_pose("S_Hlocal", pose)
    }

    /// Pose relative to the station root.
    pub fn pose_abs(&self) -> Result<Pose, ClientError> {
        self.get_pose("G_Habs")
    }

    pub fn set_pose_abs(&self, pose: &Pose) -> Result<(), ClientError> {
        self.put_pose("S_Habs", pose)
    }

    fn get_pose(&self, command: &str) -> Result<Pose, ClientError> {
        let handle = self.handle;
        self.client.call(command, |a| a.put_handle(&handle), |r| r.get_pose())
    }

    fn put_pose(&self, command: &str, pose: &Pose) -> Result<(), ClientError> {
        let handle = self.handle;
        self.client.call(
            command,
            |a| {
                a.put_pose(pose)?;
                a.put_handle(&handle)
            },
            |_| Ok(()),
        )
    }

    pub fn visible(&self) -> Result<bool, ClientError> {
        let handle = self.handle;
        self.client.call("G_Visible", |a| a.put_handle(&handle), |r| r.get_bool())
    }

    /// `frame` also toggles the item's reference frame; `None` leaves it
    /// to the station.
    pub fn set_visible(&self, visible: bool, frame: Option<bool>) -> Result<(), ClientError> {
        let handle = self.handle;
        let frame = frame.map_or(-1, i32::from);
        self.client.call(
            "S_Visible",
            |a| {
                a.put_handle(&handle)?;
                a.put_bool(visible)?;
                a.put_i32(frame)
            },
            |_| Ok(()),
        )
    }

    /// Joint values; `None` when the item has no joints.
    pub fn joints(&self) -> Result<Option<Vec<f64>>, ClientError> {
        let handle = self.handle;
        self.client.call("G_Thetas", |a| a.put_handle(&handle), |r| r.get_array())
    }

    pub fn set_joints(&self, joints: &[f64]) -> Result<(), ClientError> {
        let handle = self.handle;
        self.client.call(
            "S_Thetas",
            |a| {
                a.put_array(joints)?;
                a.put_handle(&handle)
            },
            |_| Ok(()),
        )
    }

    /// Forward kinematics for the given joints.
    pub fn solve_fk(&self, joints: &[f64]) -> Result<Pose, ClientError> {
        let handle = self.handle;
        self.client.call(
            "G_FK",
            |a| {
                a.put_array(joints)?;
                a.put_handle(&handle)
            },
            |r| r.get_pose(),
        )
    }

    /// Inverse kinematics closest to the current joints; `None` when the
    /// pose is unreachable.
    pub fn solve_ik(&self, pose: &Pose) -> Result<Option<Vec<f64>>, ClientError> {
        let handle = self.handle;
        self.client.call(
            "G_IK",
            |a| {
                a.put_pose(pose)?;
                a.put_handle(&handle)
            },
            |r| r.get_array(),
        )
    }

    /// Every inverse kinematics solution, one per column.
    pub fn solve_ik_all(&self, pose: &Pose) -> Result<Matrix, ClientError> {
        let handle = self.handle;
        self.client.call(
            "G_IK_cmpl",
            |a| {
                a.put_pose(pose)?;
                a.put_handle(&handle)
            },
            |r| r.get_matrix(),
        )
    }

    /// RGBA, each channel in `0.0..=1.0`.
    pub fn set_color(&self, rgba: [f64; 4]) -> Result<(), ClientError> {
        let handle = self.handle;
        self.client.call(
            "S_Color",
            |a| {
                a.put_handle(&handle)?;
                a.put_array(&rgba)
            },
            |_| Ok(()),
        )
    }

    /// Copy to the station clipboard; see [`Client::paste`].
    pub fn copy(&self) -> Result<(), ClientError> {
        let handle = self.handle;
        self.client.call("Copy", |a| a.put_handle(&handle), |_| Ok(()))
    }

    /// Remove the item from the station. Other clones of this `Item`
    /// become dangling.
    pub fn delete(self) -> Result<(), ClientError> {
        let handle = self.handle;
        self.client.call("Remove", |a| a.put_handle(&handle), |_| Ok(()))
    }

    /// Generate the program file for a program item.
    pub fn make_program(&self, path: &Path) -> Result<ProgramReport, ClientError> {
        let handle = self.handle;
        let path = path.to_string_lossy();
        self.client.call_with_timeout(
            "MakeProg",
            MAKE_PROGRAM_TIMEOUT,
            |a| {
                a.put_handle(&handle)?;
                a.put_line(&path)
            },
            |r| {
                let code = r.get_i32()?;
                let log = r.get_line()?;
                Ok(ProgramReport { code, log })
            },
        )
    }
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
