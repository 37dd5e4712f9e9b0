// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `simlink`: inspect a running simulation station from the shell.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod color;
mod commands;
mod exit_error;
mod output;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::LinkArgs;
use crate::exit_error::ExitError;
use crate::output::OutputFormat;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SIMLINK_BUILD_HASH"), ")");

#[derive(Parser)]
#[command(name = "simlink", version = VERSION, about = "Talk to a running simulation station")]
#[command(styles = color::styles())]
struct Cli {
    #[command(flatten)]
    link: LinkArgs,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect and show the station version
    Status,
    /// List station items by name
    Items(commands::items::ItemsArgs),
    /// Print station events as they arrive
    Events(commands::events::EventsArgs),
}

/// `SIMLINK_LOG` wins unless `-v` was given; default is warnings only.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("SIMLINK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.link.into_config()?;
    match cli.command {
        Commands::Status => commands::status::handle(config, cli.output),
        Commands::Items(args) => commands::items::handle(config, args, cli.output),
        Commands::Events(args) => commands::events::handle(config, args, cli.output),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(err) = run(cli) {
        let code = err.downcast_ref::<ExitError>().map_or(1, |e| e.code);
        eprintln!("error: {err:#}");
        std::process::exit(code);
    }
}
