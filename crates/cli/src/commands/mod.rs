// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod events;
pub mod items;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use simlink::LinkConfig;

/// Where to find the station; flags override the config file and
/// `SIMLINK_*` variables.
#[derive(Args, Debug, Default)]
pub struct LinkArgs {
    /// TOML file with link settings
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Station host
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Station port
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Start a local station if none answers
    #[arg(long, global = true)]
    pub launch: bool,
}

impl LinkArgs {
    pub fn into_config(self) -> Result<LinkConfig> {
        let mut config = LinkConfig::load(self.config.as_deref()).context("loading link config")?;
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
            config.port_end = None;
        }
        config.launch |= self.launch;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
