// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer identifiers.
//!
//! The only timer today is the per-phase watchdog: a dispatched step that
//! never produces its navigation would otherwise leave the run waiting
//! forever.

use crate::phase::Phase;

crate::define_id! {
    /// Unique identifier for a scheduled timer.
    pub struct TimerId;
}

const WATCHDOG_PREFIX: &str = "watchdog:";

impl TimerId {
    /// Watchdog armed while waiting in `phase`.
    pub fn watchdog(phase: Phase) -> Self {
        Self::new(format!("{WATCHDOG_PREFIX}{phase}"))
    }

    /// Phase guarded by this timer, if it is a watchdog.
    pub fn watchdog_phase(&self) -> Option<Phase> {
        self.as_str().strip_prefix(WATCHDOG_PREFIX).and_then(Phase::parse)
    }

    pub fn is_watchdog(&self) -> bool {
        self.as_str().starts_with(WATCHDOG_PREFIX)
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
