// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use pubrun_core::LogEntry;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// `[HH:MM:SS] text`, colored by kind.
pub fn format_entry(entry: &LogEntry) -> String {
    let time = crate::color::context(&format!("[{}]", entry.time_label()));
    format!("{} {}", time, crate::color::for_kind(entry.kind, &entry.text))
}

pub fn print_entry(entry: &LogEntry) {
    println!("{}", format_entry(entry));
}

/// Text value or a placeholder when empty.
pub fn or_unset(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
