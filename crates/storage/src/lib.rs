// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pubrun-storage: settings and activity log kept on local disk
//!
//! Everything lives as small JSON documents under one state directory.
//! Nothing about an in-flight run is persisted.

mod file;
mod log_store;
mod settings;

pub use file::StorageError;
pub use log_store::LogStore;
pub use settings::{Settings, SettingsStore};
