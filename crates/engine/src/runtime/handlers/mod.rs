// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event handling for the runtime

mod page;
mod start;
mod stop;
mod timer;

use super::Runtime;
use crate::error::RuntimeError;
use pubrun_adapters::{PageAdapter, QueueAdapter};
use pubrun_core::{Clock, Event, LogKind};

impl<Q, P, C> Runtime<Q, P, C>
where
    Q: QueueAdapter,
    P: PageAdapter,
    C: Clock,
{
    /// Handle an incoming event and return any produced events
    pub async fn handle_event(&self, event: Event) -> Result<Vec<Event>, RuntimeError> {
        let mut result_events = Vec::new();

        match &event {
            Event::RunStart { store_url, source_path } => {
                result_events.extend(self.handle_run_start(store_url, source_path).await?);
            }

            Event::RunStop { reason } => {
                self.handle_run_stop(reason).await?;
            }

            Event::PageOpened { page, url } => {
                self.handle_page_opened(page, url);
            }

            Event::PageLoaded { page, url } => {
                result_events.extend(self.handle_page_loaded(page, url).await?);
            }

            Event::PageError { page, reason } => {
                self.handle_page_error(page.as_ref(), reason).await?;
            }

            Event::LogLine { text, kind } => {
                self.log(*kind, text.clone());
            }

            Event::TimerStart { id } => {
                self.handle_timer(id).await?;
            }

            Event::Custom => {}
        }

        Ok(result_events)
    }

    /// Handle an event plus everything it produces, depth first.
    pub async fn process(&self, event: Event) -> Result<(), RuntimeError> {
        let mut pending = vec![event];
        while let Some(event) = pending.pop() {
            tracing::debug!(event = %event.log_summary(), "handling");
            let produced = self.handle_event(event).await?;
            pending.extend(produced.into_iter().rev());
        }
        Ok(())
    }

    pub(crate) fn log_ok(&self, text: impl Into<String>) {
        self.log(LogKind::Ok, text);
    }

    pub(crate) fn log_info(&self, text: impl Into<String>) {
        self.log(LogKind::Info, text);
    }
}
