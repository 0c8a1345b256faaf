// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pubrun-engine: the orchestrator that drives a publish run
//!
//! The runtime reacts to page loads, step failures, operator requests and
//! watchdog timers. Side effects on the controlled page and timers go
//! through the executor; queue calls are awaited inline.

mod activity_log;
mod error;
mod executor;
mod runtime;
mod scheduler;

#[cfg(test)]
mod test_helpers;

pub use activity_log::ActivityLog;
pub use error::{ExecuteError, RuntimeError};
pub use executor::Executor;
pub use runtime::{
    RunOutcome, Runtime, RuntimeConfig, RuntimeDeps, DEFAULT_PHASE_TIMEOUT,
    DEFAULT_PUBLISHED_PATTERN,
};
pub use scheduler::Scheduler;
