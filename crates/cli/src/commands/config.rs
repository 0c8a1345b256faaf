// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pubrun config` - Store link and source path

use crate::output::{or_unset, OutputFormat};
use anyhow::Result;
use clap::{Args, Subcommand};
use pubrun_storage::{Settings, SettingsStore};
use std::path::Path;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Save the store link and source path
    Save {
        /// Store page the run starts from (design copy link)
        #[arg(long = "store-url")]
        store_url: String,
        /// Path of the source sheet the queue server reads
        #[arg(long = "source")]
        source: String,
    },
    /// Show saved settings
    Show,
    /// Forget saved settings
    Clear,
}

pub fn config(args: ConfigArgs, state_dir: &Path, format: OutputFormat) -> Result<()> {
    let store = SettingsStore::new(state_dir);
    match args.command {
        ConfigCommand::Save { store_url, source } => {
            store.save(&Settings::new(&store_url, &source))?;
            println!("Saved settings.");
        }
        ConfigCommand::Show => show(&store.load()?, format)?,
        ConfigCommand::Clear => {
            store.clear()?;
            println!("Cleared settings.");
        }
    }
    Ok(())
}

fn show(settings: &Settings, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{} {}", crate::color::header("Store link: "), or_unset(&settings.store_url));
            println!("{} {}", crate::color::header("Source path:"), or_unset(&settings.source_path));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(settings)?);
        }
    }
    Ok(())
}
