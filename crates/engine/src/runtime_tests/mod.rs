// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime tests

mod cycle;
mod errors;
mod start;
mod watchdog;

use super::*;
use crate::test_helpers::{
    row, row_id, setup, setup_with, setup_with_rows, TestContext, PUBLISHED_URL, SOURCE,
    STORE_URL, UPLOADER_URL,
};
use pubrun_adapters::{PageCall, PageError, QueueCall, QueueError};
use pubrun_core::{Event, Instruction, LogKind, PageId, Phase};

fn queue_down() -> QueueError {
    QueueError::Unreachable("connection refused".to_string())
}
