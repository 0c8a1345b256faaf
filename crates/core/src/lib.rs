// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pubrun-core: data model and message protocol for the publish runner

pub mod macros;

pub mod clock;
pub mod effect;
pub mod event;
pub mod id;
pub mod instruction;
pub mod log;
pub mod phase;
pub mod row;
pub mod run;
pub mod text;
pub mod timer;

pub use clock::{Clock, FakeClock, SystemClock};
pub use effect::Effect;
pub use event::Event;
pub use id::PageId;
pub use instruction::Instruction;
pub use log::{LogBuffer, LogEntry, LogKind, LogSink, LOG_CAPACITY};
pub use phase::Phase;
#[cfg(any(test, feature = "test-support"))]
pub use row::RowBuilder;
pub use row::{Row, RowId, TagList};
pub use run::Run;
pub use text::{clean_path, strip_quotes};
pub use timer::TimerId;
