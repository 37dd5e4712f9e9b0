// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal coloring for help output and text reports.

use std::io::IsTerminal;

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};

/// Palette entries, as 256-color codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Section headers and item names
    Header = 74,
    /// Commands and literal values
    Literal = 250,
    /// Secondary fields such as handles and timestamps
    Muted = 243,
    /// Warnings echoed from the station
    Warning = 179,
}

/// `NO_COLOR=1` disables, `SIMLINK_COLOR=1` forces, otherwise only on a TTY.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("SIMLINK_COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn style(tone: Tone) -> Style {
    Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(tone as u8))))
}

/// Clap help styles in the project palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(style(Tone::Header))
        .literal(style(Tone::Literal))
        .placeholder(style(Tone::Muted))
}

pub fn paint(tone: Tone, text: &str) -> String {
    if should_colorize() {
        format!("\x1b[38;5;{}m{text}\x1b[0m", tone as u8)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
