// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer event handling

use super::super::Runtime;
use super::stop::Halt;
use crate::error::RuntimeError;
use pubrun_adapters::{PageAdapter, QueueAdapter};
use pubrun_core::{Clock, TimerId};

impl<Q, P, C> Runtime<Q, P, C>
where
    Q: QueueAdapter,
    P: PageAdapter,
    C: Clock,
{
    pub(crate) async fn handle_timer(&self, id: &TimerId) -> Result<(), RuntimeError> {
        let Some(phase) = id.watchdog_phase() else {
            tracing::debug!(timer_id = %id, "ignoring unknown timer");
            return Ok(());
        };
        {
            let run = self.run.lock();
            if !run.is_active() || run.phase != phase {
                tracing::debug!(timer_id = %id, phase = %run.phase, "stale watchdog");
                return Ok(());
            }
        }
        // Fired timers are already out of the scheduler
        self.watchdog.lock().take();
        let reason = format!("Timed out waiting for {}.", phase.page_label());
        self.stop(&reason, Halt::Clear).await
    }
}
