// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine errors

use pubrun_adapters::PageError;
use thiserror::Error;

/// Errors that can occur during effect execution
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("page error: {0}")]
    Page(#[from] PageError),
}

/// Errors that escape event handling.
///
/// Transition failures become run stops; these are the failures that
/// cannot be expressed as one.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("execute error: {0}")]
    Execute(#[from] ExecuteError),
}
