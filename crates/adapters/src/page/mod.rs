// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Page action executor.
//!
//! Owns the controlled browser page: opens or redirects it, reports
//! navigation-complete notifications, and runs the store and uploader
//! steps inside it. A dispatched step never reports success; its last
//! action triggers a navigation and the orchestrator waits for that.

pub mod cdp;
mod dom;
mod steps;
pub mod wait;

pub use dom::{Dom, DomError, TagFill};
pub use steps::{run_instruction, store_step, uploader_step, StepError, StepTiming};

use async_trait::async_trait;
use pubrun_core::{Event, Instruction, LogKind, PageId};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors from page operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// The page cannot accept instructions (closed, or no session attached)
    #[error("page unreachable: {0}")]
    Unreachable(String),
    #[error("browser error: {0}")]
    Browser(String),
}

/// Sends step progress lines to the orchestrator.
#[derive(Clone, Debug)]
pub struct Progress {
    tx: mpsc::Sender<Event>,
}

impl Progress {
    pub fn new(tx: mpsc::Sender<Event>) -> Self {
        Self { tx }
    }

    pub async fn line(&self, text: impl Into<String>, kind: LogKind) {
        let _ = self.tx.send(Event::LogLine { text: text.into(), kind }).await;
    }

    pub async fn ok(&self, text: impl Into<String>) {
        self.line(text, LogKind::Ok).await;
    }
}

/// Adapter for the controlled browser page
#[async_trait]
pub trait PageAdapter: Clone + Send + Sync + 'static {
    /// Open the controlled page at `url`.
    ///
    /// When `reuse` names a page that is still alive it is redirected and
    /// brought to the front; otherwise a new page is created.
    async fn open(&self, reuse: Option<&PageId>, url: &str) -> Result<PageId, PageError>;

    /// Redirect an owned page.
    async fn navigate(&self, page: &PageId, url: &str) -> Result<(), PageError>;

    /// Hand an instruction to the page.
    ///
    /// Returns once the page accepted it; the step then runs in the
    /// background. Progress arrives as `Event::LogLine` and failure as
    /// `Event::PageError` on `event_tx`.
    async fn dispatch(
        &self,
        page: &PageId,
        instruction: Instruction,
        event_tx: mpsc::Sender<Event>,
    ) -> Result<(), PageError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakePageAdapter, PageCall};
