// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recording page adapter for tests

use super::{PageAdapter, PageError};
use async_trait::async_trait;
use parking_lot::Mutex;
use pubrun_core::{Event, Instruction, PageId};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Recorded page call
#[derive(Debug, Clone, PartialEq)]
pub enum PageCall {
    Open { reuse: Option<PageId>, url: String, page: PageId },
    Navigate { page: PageId, url: String },
    Dispatch { page: PageId, instruction: Instruction },
}

#[derive(Default)]
struct FakePageState {
    calls: Vec<PageCall>,
    next_id: u32,
    closed: HashSet<PageId>,
    open_error: Option<PageError>,
    dispatch_error: Option<PageError>,
    event_tx: Option<mpsc::Sender<Event>>,
}

/// Fake page adapter.
///
/// Opening allocates `page-1`, `page-2`, ... unless a live page is reused.
/// Dispatched instructions are recorded, never run.
#[derive(Clone, Default)]
pub struct FakePageAdapter {
    inner: Arc<Mutex<FakePageState>>,
}

impl FakePageAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_open(&self, error: PageError) {
        self.inner.lock().open_error = Some(error);
    }

    pub fn fail_dispatch(&self, error: PageError) {
        self.inner.lock().dispatch_error = Some(error);
    }

    pub fn clear_dispatch_failure(&self) {
        self.inner.lock().dispatch_error = None;
    }

    /// Simulate the operator closing a page.
    pub fn close(&self, page: &PageId) {
        self.inner.lock().closed.insert(page.clone());
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<PageCall> {
        self.inner.lock().calls.clone()
    }

    pub fn opens(&self) -> Vec<PageCall> {
        self.calls().into_iter().filter(|c| matches!(c, PageCall::Open { .. })).collect()
    }

    pub fn navigations(&self) -> Vec<(PageId, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                PageCall::Navigate { page, url } => Some((page, url)),
                _ => None,
            })
            .collect()
    }

    pub fn dispatched(&self) -> Vec<Instruction> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                PageCall::Dispatch { instruction, .. } => Some(instruction),
                _ => None,
            })
            .collect()
    }

    /// Sender handed to the most recent dispatch, to emit page events.
    pub fn event_tx(&self) -> Option<mpsc::Sender<Event>> {
        self.inner.lock().event_tx.clone()
    }
}

#[async_trait]
impl PageAdapter for FakePageAdapter {
    async fn open(&self, reuse: Option<&PageId>, url: &str) -> Result<PageId, PageError> {
        let mut state = self.inner.lock();
        if let Some(e) = state.open_error.clone() {
            return Err(e);
        }
        let page = match reuse {
            Some(page) if !state.closed.contains(page) => page.clone(),
            _ => {
                state.next_id += 1;
                PageId::new(format!("page-{}", state.next_id))
            }
        };
        state.calls.push(PageCall::Open {
            reuse: reuse.cloned(),
            url: url.to_string(),
            page: page.clone(),
        });
        Ok(page)
    }

    async fn navigate(&self, page: &PageId, url: &str) -> Result<(), PageError> {
        let mut state = self.inner.lock();
        if state.closed.contains(page) {
            return Err(PageError::Unreachable(page.to_string()));
        }
        state.calls.push(PageCall::Navigate { page: page.clone(), url: url.to_string() });
        Ok(())
    }

    async fn dispatch(
        &self,
        page: &PageId,
        instruction: Instruction,
        event_tx: mpsc::Sender<Event>,
    ) -> Result<(), PageError> {
        let mut state = self.inner.lock();
        if state.closed.contains(page) {
            return Err(PageError::Unreachable(page.to_string()));
        }
        if let Some(e) = state.dispatch_error.clone() {
            return Err(e);
        }
        state.calls.push(PageCall::Dispatch { page: page.clone(), instruction });
        state.event_tx = Some(event_tx);
        Ok(())
    }
}
