// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic tracing for long-running commands.
//!
//! The terminal shows the activity log; `tracing` output goes to
//! `<state_dir>/pubrun.log`.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE: &str = "pubrun.log";

/// Install the file subscriber. Keep the guard alive until exit so
/// buffered lines are flushed.
pub fn init(state_dir: &Path) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(state_dir)?;
    let appender = tracing_appender::rolling::never(state_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_new(crate::env::log_filter()).unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init();
    Ok(guard)
}
