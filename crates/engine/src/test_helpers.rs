// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine crate.

use crate::{ActivityLog, Runtime, RuntimeConfig, RuntimeDeps};
use pubrun_adapters::{FakePageAdapter, FakeQueueAdapter};
use pubrun_core::{Clock, Event, FakeClock, PageId, Row, RowId};
use std::time::Duration;
use tokio::sync::mpsc;

pub(crate) const STORE_URL: &str = "https://www.teepublic.com/design/copy/1";
pub(crate) const SOURCE: &str = r"C:\work\designs.xlsx";
pub(crate) const UPLOADER_URL: &str = "https://www.teepublic.com/design/quick_create";
pub(crate) const PUBLISHED_URL: &str = "https://www.teepublic.com/t-shirt/4242-cat-nap";

/// Convenience alias for the fully-typed test runtime.
pub(crate) type TestRuntime = Runtime<FakeQueueAdapter, FakePageAdapter, FakeClock>;

pub(crate) struct TestContext {
    pub runtime: TestRuntime,
    pub clock: FakeClock,
    pub queue: FakeQueueAdapter,
    pub pages: FakePageAdapter,
    #[allow(dead_code)]
    pub event_rx: mpsc::Receiver<Event>,
}

pub(crate) fn row(id: u64) -> Row {
    Row::builder().id(id).title(format!("Design {id}")).build()
}

pub(crate) fn setup() -> TestContext {
    setup_with(Vec::new(), RuntimeConfig::default())
}

pub(crate) fn setup_with_rows(rows: impl IntoIterator<Item = Row>) -> TestContext {
    setup_with(rows, RuntimeConfig::default())
}

pub(crate) fn setup_with(rows: impl IntoIterator<Item = Row>, config: RuntimeConfig) -> TestContext {
    let queue = FakeQueueAdapter::with_rows(rows);
    let pages = FakePageAdapter::new();
    let clock = FakeClock::new();
    let (event_tx, event_rx) = mpsc::channel(100);
    let runtime = Runtime::new(
        RuntimeDeps { queue: queue.clone(), pages: pages.clone() },
        clock.clone(),
        config,
        ActivityLog::new(),
        event_tx,
    );
    TestContext { runtime, clock, queue, pages, event_rx }
}

impl TestContext {
    pub(crate) fn page(&self) -> PageId {
        PageId::new("page-1")
    }

    pub(crate) async fn start(&self) {
        self.runtime
            .process(Event::RunStart {
                store_url: STORE_URL.to_string(),
                source_path: SOURCE.to_string(),
            })
            .await
            .unwrap();
    }

    /// A navigation finished on the controlled page.
    pub(crate) async fn loaded(&self, url: &str) {
        self.runtime
            .process(Event::PageLoaded { page: self.page(), url: url.to_string() })
            .await
            .unwrap();
    }

    /// Start and walk one row through store and uploader steps.
    pub(crate) async fn start_and_reach_published(&self) {
        self.start().await;
        self.loaded(STORE_URL).await;
        self.loaded(UPLOADER_URL).await;
    }

    pub(crate) fn log_texts(&self) -> Vec<String> {
        self.runtime.activity().texts()
    }

    /// Advance past every pending timer and return their ids.
    pub(crate) fn fire_timers(&self, by: Duration) -> Vec<Event> {
        let scheduler = self.runtime.executor.scheduler();
        let mut sched = scheduler.lock();
        self.clock.advance(by);
        sched.fired_timers(self.clock.now())
    }

    pub(crate) fn pending_timer_ids(&self) -> Vec<String> {
        self.fire_timers(Duration::from_secs(7200))
            .into_iter()
            .filter_map(|e| match e {
                Event::TimerStart { id } => Some(id.as_str().to_string()),
                _ => None,
            })
            .collect()
    }
}

pub(crate) fn row_id(id: u64) -> RowId {
    RowId::from(id)
}
