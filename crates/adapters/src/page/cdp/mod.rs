// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Browser page adapter over the Chrome DevTools Protocol.
//!
//! Works with any Chromium-family browser started with
//! `--remote-debugging-port`. Pages are created blank, attached, and only
//! then navigated, so no load event is missed.

mod dom;
mod scripts;
mod session;
mod targets;

pub use targets::TargetInfo;

use super::{run_instruction, DomError, PageAdapter, PageError, Progress, StepTiming};
use crate::queue::QueueAdapter;
use async_trait::async_trait;
use dom::CdpDom;
use parking_lot::Mutex;
use pubrun_core::{Event, Instruction, PageId};
use serde_json::json;
use session::Session;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use targets::TargetClient;
use thiserror::Error;
use tokio::sync::mpsc;

/// DevTools HTTP endpoint of a locally started browser.
pub const DEFAULT_BROWSER_URL: &str = "http://127.0.0.1:9222";

/// Bound on the liveness probe run before accepting an instruction.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CdpError {
    #[error("cannot reach browser: {0}")]
    Connect(String),
    #[error("devtools session closed")]
    Closed,
    #[error("timed out waiting for {0}")]
    Timeout(String),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("{0}")]
    Script(String),
}

impl From<CdpError> for DomError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::Closed => DomError::Closed,
            CdpError::Script(s) => DomError::Script(s),
            other => DomError::Script(other.to_string()),
        }
    }
}

impl From<CdpError> for PageError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::Closed => PageError::Unreachable(e.to_string()),
            other => PageError::Browser(other.to_string()),
        }
    }
}

/// Page adapter driving a real browser.
///
/// `files` is used by the uploader step to download designs.
#[derive(Clone)]
pub struct ChromeAdapter<Q: QueueAdapter> {
    targets: TargetClient,
    files: Q,
    timing: StepTiming,
    event_tx: mpsc::Sender<Event>,
    sessions: Arc<Mutex<HashMap<PageId, Session>>>,
}

impl<Q: QueueAdapter> ChromeAdapter<Q> {
    /// `event_tx` receives `PageLoaded` for every page this adapter opens.
    pub fn new(browser_url: &str, files: Q, event_tx: mpsc::Sender<Event>) -> Self {
        Self {
            targets: TargetClient::new(browser_url),
            files,
            timing: StepTiming::default(),
            event_tx,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_timing(mut self, timing: StepTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn browser_url(&self) -> &str {
        self.targets.base_url()
    }

    fn live_session(&self, page: &PageId) -> Option<Session> {
        let mut sessions = self.sessions.lock();
        match sessions.get(page) {
            Some(session) if session.is_alive() => Some(session.clone()),
            Some(_) => {
                sessions.remove(page);
                None
            }
            None => None,
        }
    }

    async fn attach(&self, target: &TargetInfo) -> Result<Session, CdpError> {
        let ws_url = target
            .ws_url
            .as_deref()
            .ok_or_else(|| CdpError::Protocol(format!("target {} has no debugger url", target.id)))?;
        let page = PageId::new(target.id.clone());
        let session = Session::connect(ws_url, page.clone(), self.event_tx.clone()).await?;
        session.call("Page.enable", json!({})).await?;
        self.sessions.lock().insert(page, session.clone());
        Ok(session)
    }

    async fn navigate_session(session: &Session, url: &str) -> Result<(), CdpError> {
        let reply = session.call("Page.navigate", json!({ "url": url })).await?;
        match reply.get("errorText").and_then(|e| e.as_str()) {
            Some(error) => Err(CdpError::Protocol(format!("navigation failed: {error}"))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<Q: QueueAdapter> PageAdapter for ChromeAdapter<Q> {
    async fn open(&self, reuse: Option<&PageId>, url: &str) -> Result<PageId, PageError> {
        if let Some(page) = reuse {
            if let Some(session) = self.live_session(page) {
                Self::navigate_session(&session, url).await?;
                if let Err(e) = self.targets.activate(page.as_str()).await {
                    tracing::debug!(%page, error = %e, "activate failed");
                }
                tracing::info!(%page, url, "reusing controlled page");
                return Ok(page.clone());
            }
            tracing::info!(%page, "controlled page gone, opening a new one");
        }

        let target = self.targets.create("about:blank").await?;
        let session = self.attach(&target).await?;
        Self::navigate_session(&session, url).await?;
        let page = PageId::new(target.id);
        tracing::info!(%page, url, "opened controlled page");
        Ok(page)
    }

    async fn navigate(&self, page: &PageId, url: &str) -> Result<(), PageError> {
        let session = self
            .live_session(page)
            .ok_or_else(|| PageError::Unreachable(format!("no session for {page}")))?;
        Self::navigate_session(&session, url).await?;
        Ok(())
    }

    async fn dispatch(
        &self,
        page: &PageId,
        instruction: Instruction,
        event_tx: mpsc::Sender<Event>,
    ) -> Result<(), PageError> {
        let session = self
            .live_session(page)
            .ok_or_else(|| PageError::Unreachable(format!("no session for {page}")))?;
        let probe = session.clone().with_call_timeout(PROBE_TIMEOUT);
        probe.evaluate("true").await.map_err(|e| PageError::Unreachable(e.to_string()))?;

        let files = self.files.clone();
        let timing = self.timing.clone();
        let page = page.clone();
        tracing::info!(%page, instruction = instruction.name(), url = %session.url(), "dispatching");
        tokio::spawn(async move {
            let dom = CdpDom::new(session);
            let progress = Progress::new(event_tx.clone());
            if let Err(e) = run_instruction(&dom, &files, &instruction, &timing, &progress).await {
                tracing::warn!(%page, instruction = instruction.name(), error = %e, "step failed");
                let _ = event_tx.send(Event::PageError { page: Some(page), reason: e.to_string() }).await;
            }
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
