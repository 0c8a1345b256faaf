// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pubrun - publish designs from a work queue through a browser

mod color;
mod commands;
mod env;
mod exit_error;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, logs, start};
use exit_error::ExitError;
use output::OutputFormat;

/// Package version tagged with the commit it was built from.
const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH"));

#[derive(Parser)]
#[command(
    name = "pubrun",
    version = VERSION,
    about = "Publish runner - walks queued designs through the store's uploader",
    styles = color::styles()
)]
struct Cli {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the saved store link and source path
    Config(config::ConfigArgs),
    /// Start a run and follow it until it ends
    Start(start::StartArgs),
    /// Show the retained activity log
    Logs(logs::LogsArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let code = match e.downcast_ref::<ExitError>() {
            Some(exit) => {
                if !exit.message.is_empty() {
                    eprintln!("Error: {}", exit.message);
                }
                exit.code
            }
            None => {
                eprintln!("Error: {e:#}");
                1
            }
        };
        std::process::exit(code);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let state_dir = env::state_dir()?;

    match cli.command {
        Commands::Config(args) => config::config(args, &state_dir, cli.output),
        Commands::Start(args) => start::start(args, &state_dir).await,
        Commands::Logs(args) => logs::logs(args, &state_dir, cli.output),
    }
}
