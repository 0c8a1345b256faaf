// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects represent side effects the orchestrator needs performed

use crate::id::{self, PageId};
use crate::instruction::Instruction;
use crate::timer::TimerId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Effects that need to be executed by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    // === Page effects ===
    /// Open the controlled page at `url`, reusing `reuse` when it is still alive
    OpenPage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reuse: Option<PageId>,
        url: String,
    },

    /// Redirect an owned page
    Navigate { page: PageId, url: String },

    /// Hand an instruction to the page action executor
    Dispatch { page: PageId, instruction: Instruction },

    // === Timer effects ===
    SetTimer {
        id: TimerId,
        #[serde(with = "duration_serde")]
        duration: Duration,
    },

    CancelTimer { id: TimerId },
}

impl Effect {
    /// Effect name for log spans (e.g., "open_page", "dispatch")
    pub fn name(&self) -> &'static str {
        match self {
            Effect::OpenPage { .. } => "open_page",
            Effect::Navigate { .. } => "navigate",
            Effect::Dispatch { .. } => "dispatch",
            Effect::SetTimer { .. } => "set_timer",
            Effect::CancelTimer { .. } => "cancel_timer",
        }
    }

    /// Key-value pairs for structured logging
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::OpenPage { reuse, url } => vec![
                ("reuse", reuse.as_ref().map(|p| p.to_string()).unwrap_or_default()),
                ("url", id::short(url, 80).to_string()),
            ],
            Effect::Navigate { page, url } => {
                vec![("page", page.to_string()), ("url", id::short(url, 80).to_string())]
            }
            Effect::Dispatch { page, instruction } => vec![
                ("page", page.to_string()),
                ("instruction", instruction.name().to_string()),
                ("row", instruction.row_id().to_string()),
            ],
            Effect::SetTimer { id, duration } => vec![
                ("timer_id", id.to_string()),
                ("duration_ms", duration.as_millis().to_string()),
            ],
            Effect::CancelTimer { id } => vec![("timer_id", id.to_string())],
        }
    }

    /// Whether to log both 'started' and 'completed' or just 'executed'.
    pub fn verbose(&self) -> bool {
        match self {
            Effect::SetTimer { .. } => false,
            Effect::CancelTimer { .. } => false,
            _ => true,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, s: S) -> Result<S::Ok, S::Error> {
        duration.as_millis().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(d)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
