// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stops, failures and the per-phase watchdog

use super::super::{RunOutcome, Runtime};
use crate::error::RuntimeError;
use pubrun_adapters::{PageAdapter, QueueAdapter};
use pubrun_core::{Clock, Effect, LogKind, PageId, Run, TimerId};

/// What happens to the run context on a stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Halt {
    /// Forget the current row
    Clear,
    /// Keep the current row so its bookkeeping can be finished by hand
    RetainRow,
    /// Drop the whole run (it never got going)
    Discard,
}

impl<Q, P, C> Runtime<Q, P, C>
where
    Q: QueueAdapter,
    P: PageAdapter,
    C: Clock,
{
    /// Fatal stop: halt the run and log the reason as an error.
    pub(crate) async fn stop(&self, reason: &str, halt: Halt) -> Result<(), RuntimeError> {
        {
            let mut run = self.run.lock();
            tracing::warn!(phase = %run.phase, row = ?run.current_row_id, reason, "stopping run");
            match halt {
                Halt::Clear => run.halt(false),
                Halt::RetainRow => run.halt(true),
                Halt::Discard => *run = Run::default(),
            }
        }
        self.disarm_watchdog().await?;
        *self.outcome.lock() = Some(RunOutcome::Stopped { reason: reason.to_string() });
        self.log(LogKind::Error, format!("Stopped: {reason}"));
        Ok(())
    }

    /// The queue ran dry: the run ends successfully.
    pub(crate) async fn complete(&self) -> Result<(), RuntimeError> {
        {
            let mut run = self.run.lock();
            tracing::info!(completed = run.completed, "queue exhausted");
            run.halt(false);
        }
        self.disarm_watchdog().await?;
        *self.outcome.lock() = Some(RunOutcome::Exhausted);
        self.log_ok("No rows left. Done.");
        Ok(())
    }

    pub(crate) async fn handle_run_stop(&self, reason: &str) -> Result<(), RuntimeError> {
        if !self.run.lock().running {
            tracing::debug!(reason, "stop requested with no active run");
            return Ok(());
        }
        self.stop(reason, Halt::Clear).await
    }

    pub(crate) async fn handle_page_error(
        &self,
        page: Option<&PageId>,
        reason: &str,
    ) -> Result<(), RuntimeError> {
        {
            let run = self.run.lock();
            if !run.running {
                tracing::debug!(reason, "page error with no active run");
                return Ok(());
            }
            if let Some(page) = page {
                if !run.owns(page) {
                    tracing::debug!(%page, reason, "page error from a page this run does not own");
                    return Ok(());
                }
            }
        }
        let reason = if reason.trim().is_empty() { "Unknown error" } else { reason };
        self.stop(reason, Halt::Clear).await
    }

    /// (Re)arm the watchdog for the run's current phase.
    pub(crate) async fn arm_watchdog(&self) -> Result<(), RuntimeError> {
        let phase = self.run.lock().phase;
        if !phase.is_waiting() {
            return Ok(());
        }
        self.disarm_watchdog().await?;
        let id = TimerId::watchdog(phase);
        self.executor
            .execute(Effect::SetTimer { id: id.clone(), duration: self.config.phase_timeout })
            .await?;
        *self.watchdog.lock() = Some(id);
        Ok(())
    }

    pub(crate) async fn disarm_watchdog(&self) -> Result<(), RuntimeError> {
        let armed = self.watchdog.lock().take();
        if let Some(id) = armed {
            self.executor.execute(Effect::CancelTimer { id }).await?;
        }
        Ok(())
    }
}
