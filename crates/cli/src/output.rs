// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use serde::Serialize;
use simlink::{Event, Handle, Pose};

use crate::color::{paint, Tone};

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print one value as a single JSON line.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// Translation part of a pose, in millimeters.
pub fn format_position(pose: &Pose) -> String {
    let [x, y, z] = pose.translation();
    format!("({x:.3}, {y:.3}, {z:.3})")
}

fn format_handle(handle: &Handle) -> String {
    paint(Tone::Muted, &format!("#{} {}", handle.id, handle.kind))
}

/// One line per event for text output.
pub fn format_event(event: &Event) -> String {
    match event {
        Event::Signal { kind, item } => format!("{kind:?} {}", format_handle(item)),
        Event::ItemMoved { item, relative_pose } => {
            format!("ItemMoved {} to {}", format_handle(item), format_position(relative_pose))
        }
        Event::SelectionChanged { item, feature, feature_id, .. } => {
            format!("SelectionChanged {} feature {feature:?} #{feature_id}", format_handle(item))
        }
        Event::KeyPressed { item, key_id, pressed, modifiers } => {
            let state = if *pressed { "down" } else { "up" };
            let mut keys = Vec::new();
            for (held, name) in [
                (modifiers.control(), "ctrl"),
                (modifiers.shift(), "shift"),
                (modifiers.alt(), "alt"),
                (modifiers.meta(), "meta"),
            ] {
                if held {
                    keys.push(name);
                }
            }
            keys.push("");
            let chord = keys.join("+");
            format!("Key {chord}{key_id} {state} {}", format_handle(item))
        }
        Event::Unknown { tag, item } => {
            paint(Tone::Warning, &format!("Unknown event {tag} {}", format_handle(item)))
        }
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
