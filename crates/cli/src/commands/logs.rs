// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pubrun logs` - Retained activity log

use crate::output::{print_entry, OutputFormat};
use anyhow::Result;
use clap::Args;
use pubrun_storage::LogStore;
use std::path::Path;

#[derive(Args)]
pub struct LogsArgs {
    /// Number of recent entries to show
    #[arg(short = 'n', long, default_value = "30")]
    pub limit: usize,
    /// Delete the retained entries instead of printing them
    #[arg(long)]
    pub clear: bool,
}

pub fn logs(args: LogsArgs, state_dir: &Path, format: OutputFormat) -> Result<()> {
    let store = LogStore::new(state_dir);
    if args.clear {
        store.clear()?;
        println!("Cleared logs.");
        return Ok(());
    }

    let entries = store.load()?.tail(args.limit);
    match format {
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("No log entries.");
            }
            for entry in &entries {
                print_entry(entry);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
    }
    Ok(())
}
