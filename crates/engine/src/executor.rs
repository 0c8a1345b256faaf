// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effect executor

use crate::error::ExecuteError;
use crate::scheduler::Scheduler;
use parking_lot::Mutex;
use pubrun_adapters::PageAdapter;
use pubrun_core::{Clock, Effect, Event};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Executes effects using the configured page adapter
pub struct Executor<P, C: Clock> {
    pub(crate) pages: P,
    scheduler: Arc<Mutex<Scheduler>>,
    clock: C,
    /// Handed to dispatched steps so they can report progress and failures
    event_tx: mpsc::Sender<Event>,
}

impl<P, C> Executor<P, C>
where
    P: PageAdapter,
    C: Clock,
{
    pub fn new(
        pages: P,
        scheduler: Arc<Mutex<Scheduler>>,
        clock: C,
        event_tx: mpsc::Sender<Event>,
    ) -> Self {
        Self { pages, scheduler, clock, event_tx }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Execute a single effect with tracing
    ///
    /// Returns an optional event that should be fed back into the event loop.
    pub async fn execute(&self, effect: Effect) -> Result<Option<Event>, ExecuteError> {
        let op = effect.name();
        let info = describe(&effect);
        let verbose = effect.verbose();
        if verbose {
            tracing::info!(effect = op, "executing {info}");
        }

        let started = std::time::Instant::now();
        let result = self.execute_inner(effect).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(event) if verbose => tracing::info!(event = event.is_some(), elapsed_ms, "completed"),
            Ok(event) => {
                tracing::debug!(effect = op, event = event.is_some(), elapsed_ms, "executed {info}")
            }
            Err(e) => tracing::error!(effect = op, error = %e, elapsed_ms, "failed {info}"),
        }

        result
    }

    async fn execute_inner(&self, effect: Effect) -> Result<Option<Event>, ExecuteError> {
        match effect {
            Effect::OpenPage { reuse, url } => {
                let page = self.pages.open(reuse.as_ref(), &url).await?;
                Ok(Some(Event::PageOpened { page, url }))
            }

            Effect::Navigate { page, url } => {
                self.pages.navigate(&page, &url).await?;
                Ok(None)
            }

            Effect::Dispatch { page, instruction } => {
                self.pages.dispatch(&page, instruction, self.event_tx.clone()).await?;
                Ok(None)
            }

            Effect::SetTimer { id, duration } => {
                let now = self.clock.now();
                self.scheduler.lock().set_timer(id.to_string(), duration, now);
                Ok(None)
            }

            Effect::CancelTimer { id } => {
                self.scheduler.lock().cancel_timer(id.as_str());
                Ok(None)
            }
        }
    }

    /// Get a reference to the scheduler
    pub fn scheduler(&self) -> Arc<Mutex<Scheduler>> {
        Arc::clone(&self.scheduler)
    }
}

/// `key=value` pairs of an effect's fields, space separated.
fn describe(effect: &Effect) -> String {
    effect.fields().into_iter().map(|(key, val)| format!("{key}={val}")).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
