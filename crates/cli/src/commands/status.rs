// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status command handler

use anyhow::Result;
use serde::Serialize;
use simlink::{Client, LinkConfig, StationVersion};

use crate::color::{paint, Tone};
use crate::exit_error::ExitError;
use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct StatusReport {
    endpoint: String,
    #[serde(flatten)]
    version: StationVersion,
}

pub fn handle(config: LinkConfig, format: OutputFormat) -> Result<()> {
    let client = Client::connect(config).map_err(ExitError::from)?;
    let version = client.version().map_err(ExitError::from)?;
    let endpoint = client.endpoint().unwrap_or_default();

    match format {
        OutputFormat::Json => print_json(&StatusReport { endpoint, version })?,
        OutputFormat::Text => {
            println!("{} {}", paint(Tone::Header, &version.app), version.version);
            println!("  endpoint: {endpoint}");
            println!("  build:    {} ({}-bit)", version.build_date, version.bits);
        }
    }
    Ok(())
}
