// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events pushed by the peer on the event channel.
//!
//! Each event is an `int32` tag, the handle of the item concerned, then a
//! payload whose shape depends on the tag. Payloads are not length-framed,
//! so a tag this client does not know can only be skipped safely if it
//! carries nothing; an unknown tag with a payload desyncs the channel.

use serde::{Deserialize, Serialize};

use crate::codec::Decoder;
use crate::types::{Handle, Pose, Xyz};
use crate::WireError;

/// Values in a selection payload: 16 for the clicked offset, the point and
/// normal (3 each), then feature type and id.
const SELECTION_VALUES: usize = 24;

/// Event tags known to this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    SelectionTreeChanged,
    ItemMoved,
    ReferencePicked,
    ReferenceReleased,
    ToolModified,
    IsocubeCreated,
    SelectionChanged,
    ViewMoved,
    RobotMoved,
    KeyPressed,
    ItemMovedPose,
    CollisionMapReset,
    CollisionMapTooLarge,
    CalibrationMeasurement,
    ItemChanged,
    ItemRenamed,
    ItemVisibility,
    StationChanged,
    ProgramSliderChanged,
    ProgramSliderSet,
}

enum Payload {
    Nothing,
    RelativePose,
    Selection,
    Key,
}

const EVENT_TABLE: &[(i32, EventKind)] = &[
    (1, EventKind::SelectionTreeChanged),
    (2, EventKind::ItemMoved),
    (3, EventKind::ReferencePicked),
    (4, EventKind::ReferenceReleased),
    (5, EventKind::ToolModified),
    (6, EventKind::IsocubeCreated),
    (7, EventKind::SelectionChanged),
    (8, EventKind::ViewMoved),
    (9, EventKind::RobotMoved),
    (10, EventKind::KeyPressed),
    (11, EventKind::ItemMovedPose),
    (12, EventKind::CollisionMapReset),
    (13, EventKind::CollisionMapTooLarge),
    (14, EventKind::CalibrationMeasurement),
    (16, EventKind::ItemChanged),
    (17, EventKind::ItemRenamed),
    (18, EventKind::ItemVisibility),
    (19, EventKind::StationChanged),
    (20, EventKind::ProgramSliderChanged),
    (21, EventKind::ProgramSliderSet),
];

impl EventKind {
    pub fn from_tag(tag: i32) -> Option<Self> {
        EVENT_TABLE.iter().find(|(code, _)| *code == tag).map(|(_, kind)| *kind)
    }

    pub fn tag(&self) -> i32 {
        EVENT_TABLE.iter().find(|(_, kind)| kind == self).map(|(code, _)| *code).unwrap_or(0)
    }

    fn payload(&self) -> Payload {
        match self {
            EventKind::ItemMoved | EventKind::ItemMovedPose => Payload::RelativePose,
            EventKind::SelectionChanged => Payload::Selection,
            EventKind::KeyPressed => Payload::Key,
            _ => Payload::Nothing,
        }
    }
}

/// What was clicked in a selection event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum FeatureType {
    None,
    Surface,
    Curve,
    Point,
    ObjectMesh,
    SurfacePreview,
    Mesh,
    HoverObjectMesh,
    HoverObject,
    Other(i32),
}

impl From<i32> for FeatureType {
    fn from(code: i32) -> Self {
        match code {
            0 => FeatureType::None,
            1 => FeatureType::Surface,
            2 => FeatureType::Curve,
            3 => FeatureType::Point,
            7 => FeatureType::ObjectMesh,
            8 => FeatureType::SurfacePreview,
            9 => FeatureType::Mesh,
            10 => FeatureType::HoverObjectMesh,
            11 => FeatureType::HoverObject,
            other => FeatureType::Other(other),
        }
    }
}

impl From<FeatureType> for i32 {
    fn from(feature: FeatureType) -> Self {
        match feature {
            FeatureType::None => 0,
            FeatureType::Surface => 1,
            FeatureType::Curve => 2,
            FeatureType::Point => 3,
            FeatureType::ObjectMesh => 7,
            FeatureType::SurfacePreview => 8,
            FeatureType::Mesh => 9,
            FeatureType::HoverObjectMesh => 10,
            FeatureType::HoverObject => 11,
            FeatureType::Other(code) => code,
        }
    }
}

/// Keyboard modifier bitmask as reported with key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyModifiers(pub u32);

impl KeyModifiers {
    pub const SHIFT: u32 = 0x0200_0000;
    pub const CONTROL: u32 = 0x0400_0000;
    pub const ALT: u32 = 0x0800_0000;
    pub const META: u32 = 0x1000_0000;

    pub fn shift(&self) -> bool {
        self.0 & Self::SHIFT != 0
    }

    pub fn control(&self) -> bool {
        self.0 & Self::CONTROL != 0
    }

    pub fn alt(&self) -> bool {
        self.0 & Self::ALT != 0
    }

    pub fn meta(&self) -> bool {
        self.0 & Self::META != 0
    }
}

/// One decoded notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Any event whose tag carries no payload.
    Signal { kind: EventKind, item: Handle },
    /// Tags 2 and 11: the item moved relative to its parent.
    ItemMoved { item: Handle, relative_pose: Pose },
    SelectionChanged {
        item: Handle,
        feature: FeatureType,
        feature_id: i32,
        clicked_offset: Pose,
        /// Selected point, in the item's frame.
        point: Xyz,
        /// Surface normal at the selected point.
        normal: Xyz,
    },
    KeyPressed {
        item: Handle,
        key_id: i32,
        /// `false` on release.
        pressed: bool,
        modifiers: KeyModifiers,
    },
    /// A tag outside the known table; no payload was read.
    Unknown { tag: i32, item: Handle },
}

impl Event {
    pub fn item(&self) -> &Handle {
        match self {
            Event::Signal { item, .. }
            | Event::ItemMoved { item, .. }
            | Event::SelectionChanged { item, .. }
            | Event::KeyPressed { item, .. }
            | Event::Unknown { item, .. } => item,
        }
    }

    pub fn kind(&self) -> Option<EventKind> {
        match self {
            Event::Signal { kind, .. } => Some(*kind),
            Event::ItemMoved { .. } => Some(EventKind::ItemMoved),
            Event::SelectionChanged { .. } => Some(EventKind::SelectionChanged),
            Event::KeyPressed { .. } => Some(EventKind::KeyPressed),
            Event::Unknown { .. } => None,
        }
    }
}

/// Decode one event: tag, handle, then the tag's payload.
pub fn decode_event<D: Decoder + ?Sized>(decoder: &mut D) -> Result<Event, WireError> {
    let tag = decoder.get_i32()?;
    let item = decoder.get_handle()?;
    let Some(kind) = EventKind::from_tag(tag) else {
        tracing::warn!(tag, item = item.id, "unknown event tag, any payload is left unread");
        return Ok(Event::Unknown { tag, item });
    };

    match kind.payload() {
        Payload::Nothing => Ok(Event::Signal { kind, item }),
        Payload::RelativePose => {
            let declared = decoder.get_count("moved pose")?;
            if declared < 16 {
                return Err(WireError::InvalidLength { field: "moved pose", len: declared as i64 });
            }
            let relative_pose = decoder.get_pose()?;
            // Values past the pose are reserved for later use
            if declared > 16 {
                decoder.get_doubles(declared - 16, "moved pose")?;
            }
            Ok(Event::ItemMoved { item, relative_pose })
        }
        Payload::Selection => {
            let data = decoder.get_array()?.unwrap_or_default();
            if data.len() < SELECTION_VALUES {
                return Err(WireError::InvalidEvent {
                    event: "selection",
                    reason: format!("expected {SELECTION_VALUES} values, got {}", data.len()),
                });
            }
            let mut offset = [0.0; 16];
            offset.copy_from_slice(&data[..16]);
            Ok(Event::SelectionChanged {
                item,
                clicked_offset: Pose::from_col_major(offset),
                point: [data[16], data[17], data[18]],
                normal: [data[19], data[20], data[21]],
                feature: FeatureType::from(data[22] as i32),
                feature_id: data[23] as i32,
            })
        }
        Payload::Key => {
            let pressed = decoder.get_i32()? == 1;
            let key_id = decoder.get_i32()?;
            let modifiers = KeyModifiers(decoder.get_i32()? as u32);
            Ok(Event::KeyPressed { item, key_id, pressed, modifiers })
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
