// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime for the publish runner

mod handlers;

use crate::activity_log::ActivityLog;
use crate::executor::Executor;
use crate::scheduler::Scheduler;
use parking_lot::Mutex;
use pubrun_adapters::{PageAdapter, QueueAdapter};
use pubrun_core::{Clock, LogKind, PageId, Run, TimerId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Substring of the page URL that marks a published design.
pub const DEFAULT_PUBLISHED_PATTERN: &str = "teepublic.com/t-shirt/";

/// How long a run may wait in one phase before it is stopped.
pub const DEFAULT_PHASE_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Runtime knobs
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub(crate) published_pattern: String,
    pub(crate) phase_timeout: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            published_pattern: DEFAULT_PUBLISHED_PATTERN.to_string(),
            phase_timeout: DEFAULT_PHASE_TIMEOUT,
        }
    }
}

impl RuntimeConfig {
    pubrun_core::setters! {
        set {
            phase_timeout: Duration,
        }
    }

    /// URL fragment of the published page. A blank pattern would match every
    /// page, so it keeps the current one.
    pub fn published_pattern(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        if pattern.trim().is_empty() {
            tracing::warn!(current = %self.published_pattern, "ignoring blank published-page pattern");
        } else {
            self.published_pattern = pattern;
        }
        self
    }
}

/// Runtime adapter dependencies
pub struct RuntimeDeps<Q, P> {
    pub queue: Q,
    pub pages: P,
}

/// How the last run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The queue had no rows left
    Exhausted,
    Stopped { reason: String },
}

/// Runtime that coordinates one run at a time.
///
/// Every handler runs to completion before the next event is taken, so the
/// locks below are only ever held between awaits.
pub struct Runtime<Q, P, C: Clock> {
    pub executor: Executor<P, C>,
    pub(crate) queue: Q,
    pub(crate) config: RuntimeConfig,
    pub(crate) log: ActivityLog,
    pub(crate) run: Mutex<Run>,
    /// Controlled page, remembered across runs and never closed
    pub(crate) page: Mutex<Option<PageId>>,
    pub(crate) watchdog: Mutex<Option<TimerId>>,
    pub(crate) outcome: Mutex<Option<RunOutcome>>,
}

impl<Q, P, C> Runtime<Q, P, C>
where
    Q: QueueAdapter,
    P: PageAdapter,
    C: Clock,
{
    pub fn new(
        deps: RuntimeDeps<Q, P>,
        clock: C,
        config: RuntimeConfig,
        log: ActivityLog,
        event_tx: mpsc::Sender<pubrun_core::Event>,
    ) -> Self {
        Self {
            executor: Executor::new(
                deps.pages,
                Arc::new(Mutex::new(Scheduler::new())),
                clock,
                event_tx,
            ),
            queue: deps.queue,
            config,
            log,
            run: Mutex::new(Run::default()),
            page: Mutex::new(None),
            watchdog: Mutex::new(None),
            outcome: Mutex::new(None),
        }
    }

    /// Snapshot of the current run
    pub fn run(&self) -> Run {
        self.run.lock().clone()
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome.lock().clone()
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.log
    }

    pub fn controlled_page(&self) -> Option<PageId> {
        self.page.lock().clone()
    }

    pub(crate) fn log(&self, kind: LogKind, text: impl Into<String>) {
        self.log.append(self.executor.clock().epoch_ms(), text, kind);
    }
}

#[cfg(test)]
#[path = "../runtime_tests/mod.rs"]
mod tests;
