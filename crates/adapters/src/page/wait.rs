// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded polling.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// Default delay between probes.
pub const POLL_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("timed out after {}ms waiting for {what}", timeout.as_millis())]
pub struct WaitTimeout {
    pub what: String,
    pub timeout: Duration,
}

/// Await `probe` until it yields `Some`, or fail after `timeout`.
///
/// The probe always runs at least once. Probe errors count as "not yet".
pub async fn poll_until<T, E, F, Fut>(
    what: &str,
    timeout: Duration,
    interval: Duration,
    mut probe: F,
) -> Result<T, WaitTimeout>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
    E: Display,
{
    let start = Instant::now();
    loop {
        match probe().await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(e) => tracing::trace!(what, error = %e, "probe failed"),
        }
        if start.elapsed() >= timeout {
            return Err(WaitTimeout { what: what.to_string(), timeout });
        }
        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
#[path = "wait_tests.rs"]
mod tests;
