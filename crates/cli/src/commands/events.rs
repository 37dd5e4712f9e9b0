// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events command handler

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use simlink::{EventChannel, LinkConfig};

use crate::exit_error::ExitError;
use crate::output::{format_event, print_json, OutputFormat};

#[derive(Args, Debug)]
pub struct EventsArgs {
    /// Stop after this long without an event (default: wait forever)
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Stop after this many events
    #[arg(long, value_name = "N")]
    pub count: Option<usize>,
}

pub fn handle(config: LinkConfig, args: EventsArgs, format: OutputFormat) -> Result<()> {
    let mut channel = EventChannel::open(&config).map_err(ExitError::from)?;
    let timeout = args.timeout_ms.map(Duration::from_millis);
    tracing::debug!(version = channel.version(), ?timeout, "listening for events");

    let mut seen = 0usize;
    while args.count.map_or(true, |limit| seen < limit) {
        let Some(event) = channel.wait_for_event(timeout).map_err(ExitError::from)? else {
            tracing::debug!(seen, "no event before timeout");
            break;
        };
        match format {
            OutputFormat::Json => print_json(&event)?,
            OutputFormat::Text => println!("{}", format_event(&event)),
        }
        seen += 1;
    }
    channel.close();
    Ok(())
}
