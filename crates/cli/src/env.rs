// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the binary.

use anyhow::{anyhow, Result};
use pubrun_adapters::{DEFAULT_BROWSER_URL, DEFAULT_QUEUE_URL};
use pubrun_engine::{DEFAULT_PHASE_TIMEOUT, DEFAULT_PUBLISHED_PATTERN};
use std::path::PathBuf;
use std::time::Duration;

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

/// Resolve state directory: PUBRUN_STATE_DIR > XDG_STATE_HOME/pubrun > ~/.local/state/pubrun
pub fn state_dir() -> Result<PathBuf> {
    if let Some(dir) = non_empty("PUBRUN_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("pubrun"));
    }
    let home = dirs::home_dir().ok_or_else(|| anyhow!("cannot determine a state directory"))?;
    Ok(home.join(".local/state/pubrun"))
}

/// Work-queue server base URL
pub fn queue_url() -> String {
    non_empty("PUBRUN_QUEUE_URL").unwrap_or_else(|| DEFAULT_QUEUE_URL.to_string())
}

/// DevTools endpoint of the controlled browser
pub fn browser_url() -> String {
    non_empty("PUBRUN_BROWSER_URL").unwrap_or_else(|| DEFAULT_BROWSER_URL.to_string())
}

/// URL substring that identifies a published design page
pub fn published_pattern() -> String {
    non_empty("PUBRUN_PUBLISHED_PATTERN").unwrap_or_else(|| DEFAULT_PUBLISHED_PATTERN.to_string())
}

/// Per-phase watchdog (default 10 min, `PUBRUN_PHASE_TIMEOUT_MS`)
pub fn phase_timeout() -> Duration {
    std::env::var("PUBRUN_PHASE_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_PHASE_TIMEOUT)
}

/// Tracing filter directive: PUBRUN_LOG > RUST_LOG > info
pub fn log_filter() -> String {
    non_empty("PUBRUN_LOG")
        .or_else(|| non_empty("RUST_LOG"))
        .unwrap_or_else(|| "info".to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
