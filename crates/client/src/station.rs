// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Station-level commands on [`Client`].

use std::time::Duration;

use serde::Serialize;
use simlink_wire::{Decoder, Encoder, Handle, ItemType, Matrix, WireError, Xyz};

use crate::client::{Client, Reply};
use crate::error::ClientError;
use crate::item::Item;

/// Calls that wait on the user at the station's screen.
pub const USER_PROMPT_TIMEOUT: Duration = Duration::from_secs(3600);

/// Full collision scans on large stations.
pub const COLLISION_SCAN_TIMEOUT: Duration = Duration::from_secs(120);

/// Prefix the station puts on the value of a parameter it does not know.
const UNKNOWN_PARAM: &str = "UNKNOWN ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationVersion {
    pub app: String,
    pub bits: i32,
    pub version: String,
    pub build_date: String,
}

/// How points are projected onto a surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Projection {
    #[default]
    None,
    Closest,
    AlongNormal,
    AlongNormalRecalc,
    ClosestRecalc,
    RecalcNormals,
}

impl Projection {
    pub fn code(self) -> i32 {
        match self {
            Projection::None => 0,
            Projection::Closest => 1,
            Projection::AlongNormal => 2,
            Projection::AlongNormalRecalc => 3,
            Projection::ClosestRecalc => 4,
            Projection::RecalcNormals => 5,
        }
    }
}

/// First obstacle hit by a segment.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionHit {
    pub item: Item,
    pub point: Xyz,
}

fn handle_of(item: Option<&Item>) -> Handle {
    item.map_or(Handle::NULL, Item::handle)
}

impl Client {
    pub fn item_at(&self, handle: Handle) -> Item {
        Item::new(self.clone(), handle)
    }

    pub fn version(&self) -> Result<StationVersion, ClientError> {
        self.call(
            "Version",
            |_| Ok(()),
            |r| {
                Ok(StationVersion {
                    app: r.get_line()?,
                    bits: r.get_i32()?,
                    version: r.get_line()?,
                    build_date: r.get_line()?,
                })
            },
        )
    }

    /// Look an item up by name. The result is not valid when nothing
    /// matches; check [`Item::is_valid`].
    pub fn item(&self, name: &str, kind: Option<ItemType>) -> Result<Item, ClientError> {
        let handle = match kind {
            None => self.call("G_Item", |a| a.put_line(name), |r| r.get_handle())?,
            Some(kind) => self.call(
                "G_Item2",
                |a| {
                    a.put_line(name)?;
                    a.put_i32(kind.into())
                },
                |r| r.get_handle(),
            )?,
        };
        Ok(self.item_at(handle))
    }

    pub fn item_list(&self, kind: Option<ItemType>) -> Result<Vec<Item>, ClientError> {
        let read = |r: &mut Reply<'_>| {
            let count = r.get_count("item count")?;
            (0..count).map(|_| r.get_handle()).collect::<Result<Vec<_>, WireError>>()
        };
        let handles = match kind {
            None => self.call("G_List_Items_ptr", |_| Ok(()), read)?,
            Some(kind) => self.call("G_List_Items_Type_ptr", |a| a.put_i32(kind.into()), read)?,
        };
        Ok(handles.into_iter().map(|h| self.item_at(h)).collect())
    }

    pub fn item_names(&self, kind: Option<ItemType>) -> Result<Vec<String>, ClientError> {
        let read = |r: &mut Reply<'_>| {
            let count = r.get_count("item count")?;
            (0..count).map(|_| r.get_line()).collect::<Result<Vec<_>, WireError>>()
        };
        match kind {
            None => self.call("G_List_Items", |_| Ok(()), read),
            Some(kind) => self.call("G_List_Items_Type", |a| a.put_i32(kind.into()), read),
        }
    }

    /// Ask the user to pick an item on screen; blocks until they do.
    pub fn pick_item(&self, message: &str, kind: Option<ItemType>) -> Result<Item, ClientError> {
        let kind = kind.unwrap_or(ItemType::Any);
        let handle = self.call_with_timeout(
            "PickItem",
            USER_PROMPT_TIMEOUT,
            |a| {
                a.put_line(message)?;
                a.put_i32(kind.into())
            },
            |r| r.get_handle(),
        )?;
        Ok(self.item_at(handle))
    }

    /// A popup waits for the user to dismiss it; otherwise the text goes
    /// to the status bar.
    pub fn show_message(&self, message: &str, popup: bool) -> Result<(), ClientError> {
        if popup {
            self.call_with_timeout("ShowMessage", USER_PROMPT_TIMEOUT, |a| a.put_line(message), |_| Ok(()))
        } else {
            self.call("ShowMessageStatus", |a| a.put_line(message), |_| Ok(()))
        }
    }

    /// Redraw the scene. `always` keeps rendering after every change.
    pub fn render(&self, always: bool) -> Result<(), ClientError> {
        self.call("Render", |a| a.put_bool(!always), |_| Ok(()))
    }

    /// Number of colliding pairs in the station.
    pub fn collisions(&self) -> Result<i32, ClientError> {
        self.call_with_timeout("Collisions", COLLISION_SCAN_TIMEOUT, |_| Ok(()), |r| r.get_i32())
    }

    /// Toggle collision checking; returns the pair count the station reports.
    pub fn set_collision_active(&self, active: bool) -> Result<i32, ClientError> {
        self.call("Collision_SetState", |a| a.put_bool(active), |r| r.get_i32())
    }

    /// First collision along the segment `from`..`to`, in absolute
    /// coordinates.
    pub fn collision_line(&self, from: Xyz, to: Xyz) -> Result<Option<CollisionHit>, ClientError> {
        let (handle, point) = self.call(
            "CollisionLine",
            |a| {
                a.put_xyz(&from)?;
                a.put_xyz(&to)
            },
            |r| Ok((r.get_handle()?, r.get_xyz()?)),
        )?;
        if handle.is_null() {
            return Ok(None);
        }
        Ok(Some(CollisionHit { item: self.item_at(handle), point }))
    }

    pub fn add_frame(&self, name: &str, parent: Option<&Item>) -> Result<Item, ClientError> {
        let parent = handle_of(parent);
        let handle = self.call(
            "Add_FRAME",
            |a| {
                a.put_line(name)?;
                a.put_handle(&parent)
            },
            |r| r.get_handle(),
        )?;
        Ok(self.item_at(handle))
    }

    /// Add a curve from points given one per column (xyz, optionally
    /// followed by the normal).
    pub fn add_curve(
        &self,
        points: &Matrix,
        reference: Option<&Item>,
        add_to_reference: bool,
        projection: Projection,
    ) -> Result<Item, ClientError> {
        let reference = handle_of(reference);
        let handle = self.call(
            "AddWire",
            |a| {
                a.put_matrix(points)?;
                a.put_handle(&reference)?;
                a.put_bool(add_to_reference)?;
                a.put_i32(projection.code())
            },
            |r| r.get_handle(),
        )?;
        Ok(self.item_at(handle))
    }

    /// Project points (one per column) onto `object`.
    pub fn project_points(
        &self,
        points: &Matrix,
        object: &Item,
        projection: Projection,
    ) -> Result<Matrix, ClientError> {
        let object = object.handle();
        self.call(
            "ProjectPoints",
            |a| {
                a.put_matrix(points)?;
                a.put_handle(&object)?;
                a.put_i32(projection.code())
            },
            |r| r.get_matrix(),
        )
    }

    /// Station parameter; `None` when the station does not know the name.
    pub fn param(&self, name: &str) -> Result<Option<String>, ClientError> {
        let value = self.call("G_Param", |a| a.put_line(name), |r| r.get_line())?;
        if value.starts_with(UNKNOWN_PARAM) {
            return Ok(None);
        }
        Ok(Some(value))
    }

    pub fn set_param(&self, name: &str, value: &str) -> Result<(), ClientError> {
        self.call(
            "S_Param",
            |a| {
                a.put_line(name)?;
                a.put_line(value)
            },
            |_| Ok(()),
        )
    }

    /// Paste the clipboard under `parent` (the station root when `None`).
    pub fn paste(&self, parent: Option<&Item>) -> Result<Item, ClientError> {
        let parent = handle_of(parent);
        let handle = self.call("Paste", |a| a.put_handle(&parent), |r| r.get_handle())?;
        Ok(self.item_at(handle))
    }
}

#[cfg(test)]
#[path = "station_tests.rs"]
mod tests;
