// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction so watchdog deadlines and log timestamps can be
//! driven by tests.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// A clock that provides monotonic time (for deadlines) and wall time (for logs)
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;
    fn epoch_ms(&self) -> u64;
}

/// Real system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn epoch_ms(&self) -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
    }
}

#[derive(Debug)]
struct FakeTime {
    instant: Instant,
    epoch_ms: u64,
}

/// Fake clock for tests. Clones share the same time source.
#[derive(Clone, Debug)]
pub struct FakeClock {
    inner: Arc<Mutex<FakeTime>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::at_epoch_ms(1_700_000_000_000)
    }

    /// Start the fake wall clock at a specific epoch millisecond value
    pub fn at_epoch_ms(epoch_ms: u64) -> Self {
        Self { inner: Arc::new(Mutex::new(FakeTime { instant: Instant::now(), epoch_ms })) }
    }

    /// Move both monotonic and wall time forward
    pub fn advance(&self, duration: Duration) {
        let mut time = self.inner.lock();
        time.instant += duration;
        time.epoch_ms += duration.as_millis() as u64;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.inner.lock().instant
    }

    fn epoch_ms(&self) -> u64 {
        self.inner.lock().epoch_ms
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
