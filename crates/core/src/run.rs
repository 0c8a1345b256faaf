// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The active automation session.
//!
//! Exactly one `Run` exists at a time. The orchestrator owns it, builds it
//! on start and halts it on stop, completion or a fatal error. Nothing else
//! mutates it.

use crate::id::PageId;
use crate::phase::Phase;
use crate::row::{Row, RowId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub running: bool,
    pub phase: Phase,
    pub store_url: String,
    pub source_path: String,
    /// Controlled page this run drives, set once the page is opened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_row_id: Option<RowId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_row: Option<Row>,
    #[serde(default)]
    pub started_at_ms: u64,
    /// Rows marked done during this run
    #[serde(default)]
    pub completed: u32,
}

impl Run {
    /// A fresh run waiting for the store page.
    pub fn start(store_url: impl Into<String>, source_path: impl Into<String>, now_ms: u64) -> Self {
        Self {
            running: true,
            phase: Phase::WaitingStore,
            store_url: store_url.into(),
            source_path: source_path.into(),
            started_at_ms: now_ms,
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.running && self.phase.is_waiting()
    }

    /// Whether `page` is the page this run drives.
    pub fn owns(&self, page: &PageId) -> bool {
        self.page.as_ref() == Some(page)
    }

    /// Move to `next` if the transition is legal. Returns whether it moved.
    pub fn advance(&mut self, next: Phase) -> bool {
        if !self.running || !self.phase.can_enter(next) {
            return false;
        }
        self.phase = next;
        true
    }

    pub fn load_row(&mut self, row: Row) {
        self.current_row_id = Some(row.id.clone());
        self.current_row = Some(row);
    }

    /// Forget the current row after it was marked done.
    pub fn finish_row(&mut self) -> Option<RowId> {
        self.current_row = None;
        let id = self.current_row_id.take();
        if id.is_some() {
            self.completed += 1;
        }
        id
    }

    /// Stop the run. With `retain_row` the current row stays visible so
    /// its bookkeeping can be finished by hand.
    pub fn halt(&mut self, retain_row: bool) {
        self.running = false;
        self.phase = Phase::Idle;
        if !retain_row {
            self.current_row_id = None;
            self.current_row = None;
        }
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
