// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Page-load transitions: the store → uploader → published cycle

use super::super::Runtime;
use super::stop::Halt;
use crate::error::RuntimeError;
use pubrun_adapters::{NextRow, PageAdapter, QueueAdapter};
use pubrun_core::{Clock, Effect, Event, Instruction, PageId, Phase, Row};

impl<Q, P, C> Runtime<Q, P, C>
where
    Q: QueueAdapter,
    P: PageAdapter,
    C: Clock,
{
    pub(crate) async fn handle_page_loaded(
        &self,
        page: &PageId,
        url: &str,
    ) -> Result<Vec<Event>, RuntimeError> {
        let phase = {
            let run = self.run.lock();
            if !run.is_active() {
                tracing::debug!(%page, url, "page loaded with no active run");
                return Ok(vec![]);
            }
            if !run.owns(page) {
                tracing::debug!(%page, url, "page loaded on a page this run does not own");
                return Ok(vec![]);
            }
            run.phase
        };
        tracing::info!(%page, %phase, url, "page loaded");

        match phase {
            Phase::WaitingStore => self.on_store_page(page).await?,
            Phase::WaitingUploader => self.on_uploader_page(page).await?,
            Phase::WaitingPublished => self.on_published_page(page, url).await?,
            Phase::Idle => {}
        }
        Ok(vec![])
    }

    async fn on_store_page(&self, page: &PageId) -> Result<(), RuntimeError> {
        self.log_info("Store page loaded. Getting next row…");
        let source_path = self.run.lock().source_path.clone();

        let row = match self.queue.next_row(&source_path).await {
            Ok(NextRow::Row(row)) => *row,
            Ok(NextRow::Exhausted { message }) => {
                tracing::info!(%message, "no rows remaining");
                return self.complete().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, %source_path, "next-row failed");
                return self.stop("Failed to read source (server error).", Halt::Clear).await;
            }
        };

        let id = row.id.clone();
        self.run.lock().load_row(row);
        self.log_ok(format!("Processing Id={id}"));

        let dispatched = self
            .executor
            .execute(Effect::Dispatch {
                page: page.clone(),
                instruction: Instruction::StoreStep { id },
            })
            .await;
        if let Err(e) = dispatched {
            tracing::warn!(%page, error = %e, "store step not accepted");
            return self.stop("Content script not available on this page.", Halt::Clear).await;
        }
        self.enter(Phase::WaitingUploader).await
    }

    async fn on_uploader_page(&self, page: &PageId) -> Result<(), RuntimeError> {
        self.log_info("Page loaded after store step. Trying uploader step…");
        let (row, source_path): (Option<Row>, String) = {
            let run = self.run.lock();
            (run.current_row.clone(), run.source_path.clone())
        };
        let Some(row) = row else {
            return self.stop("No current row loaded (unexpected).", Halt::Clear).await;
        };

        let dispatched = self
            .executor
            .execute(Effect::Dispatch {
                page: page.clone(),
                instruction: Instruction::UploaderStep { row, source_path },
            })
            .await;
        if let Err(e) = dispatched {
            tracing::warn!(%page, error = %e, "uploader step not accepted");
            return self
                .stop("Content script not available on uploader page.", Halt::Clear)
                .await;
        }
        self.enter(Phase::WaitingPublished).await
    }

    async fn on_published_page(&self, page: &PageId, url: &str) -> Result<(), RuntimeError> {
        if !url.contains(&self.config.published_pattern) {
            tracing::debug!(%page, url, pattern = %self.config.published_pattern, "not the published page yet");
            return Ok(());
        }
        let (id, source_path, store_url) = {
            let run = self.run.lock();
            (run.current_row_id.clone(), run.source_path.clone(), run.store_url.clone())
        };
        let Some(id) = id else {
            return self.stop("No current row loaded (unexpected).", Halt::Clear).await;
        };
        self.log_info("Published page detected. Marking Done…");

        // Never retried: a lost ack must not mark a row twice
        match self.queue.mark_done(&source_path, &id).await {
            Ok(ack) => tracing::info!(row = %id, status = %ack.status, "row marked done"),
            Err(e) => {
                tracing::warn!(row = %id, error = %e, "mark-done failed");
                return self
                    .stop("Could not mark Done (source might be open/locked).", Halt::RetainRow)
                    .await;
            }
        }
        self.log_ok(format!("Marked Done for Id={id}"));
        self.run.lock().finish_row();

        let navigated = self
            .executor
            .execute(Effect::Navigate { page: page.clone(), url: store_url })
            .await;
        if let Err(e) = navigated {
            tracing::warn!(%page, error = %e, "could not return to the store page");
            return self.stop("Could not open the store page.", Halt::Clear).await;
        }
        self.enter(Phase::WaitingStore).await
    }

    /// Advance the run and re-arm the watchdog for the new phase.
    async fn enter(&self, next: Phase) -> Result<(), RuntimeError> {
        let moved = self.run.lock().advance(next);
        if !moved {
            tracing::warn!(%next, "illegal phase transition ignored");
            return Ok(());
        }
        self.arm_watchdog().await
    }
}
