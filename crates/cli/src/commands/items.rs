// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Items command handler

use anyhow::Result;
use clap::Args;
use simlink::{Client, ItemType, LinkConfig};

use crate::exit_error::ExitError;
use crate::output::{print_json, OutputFormat};

#[derive(Args, Debug)]
pub struct ItemsArgs {
    /// Only items of this type (frame, robot, tool, target, ...)
    #[arg(long = "type", value_name = "KIND", value_parser = parse_item_type)]
    pub kind: Option<ItemType>,
}

pub(crate) fn parse_item_type(name: &str) -> Result<ItemType, String> {
    ItemType::from_name(name).ok_or_else(|| format!("unknown item type '{name}'"))
}

pub fn handle(config: LinkConfig, args: ItemsArgs, format: OutputFormat) -> Result<()> {
    let client = Client::connect(config).map_err(ExitError::from)?;
    let names = client.item_names(args.kind).map_err(ExitError::from)?;

    match format {
        OutputFormat::Json => print_json(&names)?,
        OutputFormat::Text => {
            if names.is_empty() {
                println!("No items");
            }
            for name in &names {
                println!("{name}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "items_tests.rs"]
mod tests;
