// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer scheduling

use pubrun_core::{Event, TimerId};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Pending timers keyed by id. Setting an existing id re-arms it.
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: HashMap<String, Instant>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_timer(&mut self, id: String, duration: Duration, now: Instant) {
        self.timers.insert(id, now + duration);
    }

    pub fn cancel_timer(&mut self, id: &str) {
        self.timers.remove(id);
    }

    pub fn has_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().min().copied()
    }

    /// Remove and return every timer due at `now`, as `TimerStart` events.
    pub fn fired_timers(&mut self, now: Instant) -> Vec<Event> {
        let mut due: Vec<(String, Instant)> =
            self.timers.iter().filter(|(_, at)| **at <= now).map(|(id, at)| (id.clone(), *at)).collect();
        due.sort_by_key(|(_, at)| *at);
        due.into_iter()
            .map(|(id, _)| {
                self.timers.remove(&id);
                Event::TimerStart { id: TimerId::new(id) }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
