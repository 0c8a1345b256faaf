// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event types for the publish runner

mod methods;

use crate::id::PageId;
use crate::log::LogKind;
use crate::timer::TimerId;
use serde::{Deserialize, Serialize};

/// Events that trigger state transitions in the orchestrator.
///
/// Serializes with `{"type": "event:name", ...fields}` format.
/// Unknown type tags deserialize to `Custom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    #[serde(rename = "timer:start")]
    TimerStart { id: TimerId },

    /// Operator asked to start a run
    #[serde(rename = "run:start")]
    RunStart { store_url: String, source_path: String },

    /// Operator asked to stop the active run
    #[serde(rename = "run:stop")]
    RunStop { reason: String },

    /// The controlled page was created or reused
    #[serde(rename = "page:opened")]
    PageOpened { page: PageId, url: String },

    /// A navigation finished on a page
    #[serde(rename = "page:loaded")]
    PageLoaded { page: PageId, url: String },

    /// A dispatched step failed inside the page
    #[serde(rename = "page:error")]
    PageError {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        page: Option<PageId>,
        reason: String,
    },

    /// Progress line reported by a running step
    #[serde(rename = "log:line")]
    LogLine {
        text: String,
        #[serde(default)]
        kind: LogKind,
    },

    /// Catch-all for unknown event types
    #[serde(other, skip_serializing)]
    Custom,
}

#[cfg(test)]
#[path = "method_tests.rs"]
mod tests;
