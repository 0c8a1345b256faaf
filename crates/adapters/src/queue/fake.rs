// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted queue adapter for tests

use super::{Ack, FileBytes, NextRow, QueueAdapter, QueueError};
use async_trait::async_trait;
use parking_lot::Mutex;
use pubrun_core::{Row, RowId};
use std::collections::VecDeque;
use std::sync::Arc;

/// Recorded queue call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueCall {
    Ping,
    NextRow { source_path: String },
    MarkDone { source_path: String, id: RowId },
    FetchFile { path: String },
}

#[derive(Default)]
struct FakeQueueState {
    rows: VecDeque<Row>,
    calls: Vec<QueueCall>,
    ping_error: Option<QueueError>,
    next_row_error: Option<QueueError>,
    mark_done_error: Option<QueueError>,
    file_error: Option<QueueError>,
    file: Option<FileBytes>,
}

/// Fake queue: hands out scripted rows, then reports exhaustion.
#[derive(Clone, Default)]
pub struct FakeQueueAdapter {
    inner: Arc<Mutex<FakeQueueState>>,
}

impl FakeQueueAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: impl IntoIterator<Item = Row>) -> Self {
        let fake = Self::new();
        fake.inner.lock().rows.extend(rows);
        fake
    }

    pub fn push_row(&self, row: Row) {
        self.inner.lock().rows.push_back(row);
    }

    pub fn fail_ping(&self, error: QueueError) {
        self.inner.lock().ping_error = Some(error);
    }

    pub fn fail_next_row(&self, error: QueueError) {
        self.inner.lock().next_row_error = Some(error);
    }

    pub fn fail_mark_done(&self, error: QueueError) {
        self.inner.lock().mark_done_error = Some(error);
    }

    pub fn fail_fetch_file(&self, error: QueueError) {
        self.inner.lock().file_error = Some(error);
    }

    pub fn set_file(&self, file: FileBytes) {
        self.inner.lock().file = Some(file);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<QueueCall> {
        self.inner.lock().calls.clone()
    }

    /// Ids passed to mark-done, in order
    pub fn marked(&self) -> Vec<RowId> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                QueueCall::MarkDone { id, .. } => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.inner.lock().rows.len()
    }
}

#[async_trait]
impl QueueAdapter for FakeQueueAdapter {
    async fn ping(&self) -> Result<(), QueueError> {
        let mut state = self.inner.lock();
        state.calls.push(QueueCall::Ping);
        match state.ping_error.clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn next_row(&self, source_path: &str) -> Result<NextRow, QueueError> {
        let mut state = self.inner.lock();
        state.calls.push(QueueCall::NextRow { source_path: source_path.to_string() });
        if let Some(e) = state.next_row_error.clone() {
            return Err(e);
        }
        Ok(match state.rows.pop_front() {
            Some(row) => NextRow::Row(Box::new(row)),
            None => NextRow::Exhausted { message: "No rows left".to_string() },
        })
    }

    async fn mark_done(&self, source_path: &str, id: &RowId) -> Result<Ack, QueueError> {
        let mut state = self.inner.lock();
        state
            .calls
            .push(QueueCall::MarkDone { source_path: source_path.to_string(), id: id.clone() });
        match state.mark_done_error.clone() {
            Some(e) => Err(e),
            None => Ok(Ack { status: "ok".to_string(), updated_id: Some(id.clone()) }),
        }
    }

    async fn fetch_file(&self, path: &str) -> Result<FileBytes, QueueError> {
        let mut state = self.inner.lock();
        state.calls.push(QueueCall::FetchFile { path: path.to_string() });
        if let Some(e) = state.file_error.clone() {
            return Err(e);
        }
        Ok(state.file.clone().unwrap_or_else(|| FileBytes::from_path(path, None, vec![0x89, 0x50])))
    }

    fn base_url(&self) -> String {
        super::DEFAULT_QUEUE_URL.to_string()
    }
}
