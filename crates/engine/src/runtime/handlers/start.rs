// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Starting a run and taking over the controlled page

use super::super::Runtime;
use super::stop::Halt;
use crate::error::RuntimeError;
use pubrun_adapters::{PageAdapter, QueueAdapter};
use pubrun_core::{Clock, Effect, Event, PageId, Run};

impl<Q, P, C> Runtime<Q, P, C>
where
    Q: QueueAdapter,
    P: PageAdapter,
    C: Clock,
{
    pub(crate) async fn handle_run_start(
        &self,
        store_url: &str,
        source_path: &str,
    ) -> Result<Vec<Event>, RuntimeError> {
        if self.run.lock().running {
            tracing::info!("start requested during an active run, replacing it");
            self.log_info("Restarting…");
            self.disarm_watchdog().await?;
        }

        *self.run.lock() = Run::default();
        *self.outcome.lock() = None;
        self.log_ok("Starting…");

        // Nothing of the run exists until the queue answers
        if let Err(e) = self.queue.ping().await {
            tracing::warn!(error = %e, queue = %self.queue.base_url(), "queue server unreachable");
            let reason = format!("Server not connected on {}", queue_label(&self.queue.base_url()));
            self.stop(&reason, Halt::Discard).await?;
            return Ok(vec![]);
        }

        let now_ms = self.executor.clock().epoch_ms();
        *self.run.lock() = Run::start(store_url, source_path, now_ms);
        tracing::info!(store_url, source_path, "run started");

        let reuse = self.page.lock().clone();
        let opened = self
            .executor
            .execute(Effect::OpenPage { reuse, url: store_url.to_string() })
            .await;
        match opened {
            Ok(event) => {
                self.arm_watchdog().await?;
                Ok(event.into_iter().collect())
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not open the store page");
                self.stop("Could not open the store page.", Halt::Clear).await?;
                Ok(vec![])
            }
        }
    }

    pub(crate) fn handle_page_opened(&self, page: &PageId, url: &str) {
        tracing::info!(%page, url, "controlled page ready");
        *self.page.lock() = Some(page.clone());
        let mut run = self.run.lock();
        if run.running {
            run.page = Some(page.clone());
        }
    }
}

/// `host:port` of the queue server for operator messages.
fn queue_label(base_url: &str) -> &str {
    base_url
        .strip_prefix("http://")
        .or_else(|| base_url.strip_prefix("https://"))
        .unwrap_or(base_url)
        .trim_end_matches('/')
}

#[cfg(test)]
#[path = "start_tests.rs"]
mod tests;
