// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pubrun-adapters: work-queue client and page action executor

pub mod page;
pub mod queue;

pub use page::cdp::{ChromeAdapter, DEFAULT_BROWSER_URL};
pub use page::{Dom, DomError, PageAdapter, PageError, Progress, StepError, StepTiming, TagFill};
pub use queue::{
    Ack, FileBytes, HttpQueueClient, NextRow, QueueAdapter, QueueError, DEFAULT_QUEUE_URL,
};

#[cfg(any(test, feature = "test-support"))]
pub use page::{FakePageAdapter, PageCall};
#[cfg(any(test, feature = "test-support"))]
pub use queue::{FakeQueueAdapter, QueueCall};
