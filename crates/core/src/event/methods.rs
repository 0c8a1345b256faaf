// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event methods: name, log summary, page routing

use super::Event;
use crate::id::{self, PageId};

impl Event {
    pub fn name(&self) -> &str {
        match self {
            Event::TimerStart { .. } => "timer:start",
            Event::RunStart { .. } => "run:start",
            Event::RunStop { .. } => "run:stop",
            Event::PageOpened { .. } => "page:opened",
            Event::PageLoaded { .. } => "page:loaded",
            Event::PageError { .. } => "page:error",
            Event::LogLine { .. } => "log:line",
            Event::Custom => "custom",
        }
    }

    /// One-line summary for structured logs. Long text is shortened.
    pub fn log_summary(&self) -> String {
        let t = self.name();
        match self {
            Event::Custom => t.to_string(),
            Event::TimerStart { id } => format!("{t} id={id}"),
            Event::RunStart { store_url, source_path } => {
                format!("{t} store={} source={}", id::short(store_url, 60), source_path)
            }
            Event::RunStop { reason } => format!("{t} reason={reason}"),
            Event::PageOpened { page, url } | Event::PageLoaded { page, url } => {
                format!("{t} page={page} url={}", id::short(url, 80))
            }
            Event::PageError { page: Some(page), reason } => {
                format!("{t} page={page} reason={reason}")
            }
            Event::PageError { page: None, reason } => format!("{t} reason={reason}"),
            Event::LogLine { text, kind } => {
                format!("{t} kind={kind} text={}", id::short(text, 60))
            }
        }
    }

    /// Page this event concerns, if any.
    pub fn page(&self) -> Option<&PageId> {
        match self {
            Event::PageOpened { page, .. } | Event::PageLoaded { page, .. } => Some(page),
            Event::PageError { page, .. } => page.as_ref(),
            _ => None,
        }
    }
}
