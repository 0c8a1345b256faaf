// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Instructions addressed to the page action executor.
//!
//! Each instruction ends in a navigation. The orchestrator never waits on
//! the instruction itself; it waits for the next `page:loaded` event.

use crate::row::{Row, RowId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Instruction {
    /// Copy settings on the store page and continue to the uploader
    #[serde(rename = "store:step")]
    StoreStep { id: RowId },

    /// Upload the row's design, fill the form and publish
    #[serde(rename = "uploader:step")]
    UploaderStep { row: Row, source_path: String },
}

impl Instruction {
    pub fn name(&self) -> &'static str {
        match self {
            Instruction::StoreStep { .. } => "store_step",
            Instruction::UploaderStep { .. } => "uploader_step",
        }
    }

    pub fn row_id(&self) -> &RowId {
        match self {
            Instruction::StoreStep { id } => id,
            Instruction::UploaderStep { row, .. } => &row.id,
        }
    }
}
