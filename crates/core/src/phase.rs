// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator phase

use serde::{Deserialize, Serialize};

/// Which page load the orchestrator is waiting for.
///
/// Only meaningful while a run is active. The cycle is
/// `WaitingStore → WaitingUploader → WaitingPublished → WaitingStore`;
/// any phase may drop back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    WaitingStore,
    WaitingUploader,
    WaitingPublished,
}

crate::simple_display! {
    Phase {
        Idle => "idle",
        WaitingStore => "waiting_store",
        WaitingUploader => "waiting_uploader",
        WaitingPublished => "waiting_published",
    }
}

impl Phase {
    /// The phase entered after this one completes successfully.
    pub fn successor(self) -> Phase {
        match self {
            Phase::Idle => Phase::WaitingStore,
            Phase::WaitingStore => Phase::WaitingUploader,
            Phase::WaitingUploader => Phase::WaitingPublished,
            Phase::WaitingPublished => Phase::WaitingStore,
        }
    }

    pub fn is_waiting(self) -> bool {
        !matches!(self, Phase::Idle)
    }

    /// Whether `next` is a legal transition from `self`.
    pub fn can_enter(self, next: Phase) -> bool {
        next == Phase::Idle || self.successor() == next
    }

    /// Human label for the page this phase waits on (used in log lines).
    pub fn page_label(self) -> &'static str {
        match self {
            Phase::Idle => "nothing",
            Phase::WaitingStore => "the store page",
            Phase::WaitingUploader => "the uploader page",
            Phase::WaitingPublished => "the published page",
        }
    }

    pub fn parse(s: &str) -> Option<Phase> {
        match s {
            "idle" => Some(Phase::Idle),
            "waiting_store" => Some(Phase::WaitingStore),
            "waiting_uploader" => Some(Phase::WaitingUploader),
            "waiting_published" => Some(Phase::WaitingPublished),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
