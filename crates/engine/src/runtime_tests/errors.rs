// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn last_log(ctx: &TestContext) -> String {
    ctx.log_texts().last().cloned().unwrap_or_default()
}

#[tokio::test]
async fn next_row_failure_stops_the_run() {
    let ctx = setup_with_rows([row(7)]);
    ctx.queue.fail_next_row(queue_down());
    ctx.start().await;

    ctx.loaded(STORE_URL).await;

    let run = ctx.runtime.run();
    assert!(!run.running);
    assert_eq!(run.phase, Phase::Idle);
    assert_eq!(last_log(&ctx), "Stopped: Failed to read source (server error).");
    assert!(ctx.pages.dispatched().is_empty());
}

#[tokio::test]
async fn store_dispatch_failure_stops_the_run() {
    let ctx = setup_with_rows([row(7)]);
    ctx.pages.fail_dispatch(PageError::Unreachable("no session".to_string()));
    ctx.start().await;

    ctx.loaded(STORE_URL).await;

    let run = ctx.runtime.run();
    assert!(!run.running);
    assert!(run.current_row_id.is_none());
    assert_eq!(last_log(&ctx), "Stopped: Content script not available on this page.");
}

#[tokio::test]
async fn uploader_dispatch_failure_stops_the_run() {
    let ctx = setup_with_rows([row(7)]);
    ctx.start().await;
    ctx.loaded(STORE_URL).await;
    ctx.pages.fail_dispatch(PageError::Unreachable("no session".to_string()));

    ctx.loaded(UPLOADER_URL).await;

    assert!(!ctx.runtime.run().running);
    assert_eq!(last_log(&ctx), "Stopped: Content script not available on uploader page.");
}

#[tokio::test]
async fn uploader_phase_without_a_row_is_inconsistent() {
    let ctx = setup_with_rows([row(7)]);
    ctx.start().await;
    ctx.loaded(STORE_URL).await;
    {
        let mut run = ctx.runtime.run.lock();
        run.current_row = None;
    }

    ctx.loaded(UPLOADER_URL).await;

    assert!(!ctx.runtime.run().running);
    assert_eq!(last_log(&ctx), "Stopped: No current row loaded (unexpected).");
    assert_eq!(ctx.pages.dispatched().len(), 1);
}

#[tokio::test]
async fn mark_done_failure_keeps_the_row() {
    let ctx = setup_with_rows([row(7), row(8)]);
    ctx.queue.fail_mark_done(QueueError::Status {
        endpoint: "mark-done".to_string(),
        status: 500,
        body: "locked".to_string(),
    });
    ctx.start_and_reach_published().await;

    ctx.loaded(PUBLISHED_URL).await;

    let run = ctx.runtime.run();
    assert!(!run.running);
    assert_eq!(run.phase, Phase::Idle);
    assert_eq!(run.current_row_id, Some(row_id(7)));
    assert_eq!(ctx.queue.marked(), [row_id(7)], "mark-done is never retried");
    assert_eq!(last_log(&ctx), "Stopped: Could not mark Done (source might be open/locked).");
    assert!(ctx.pages.navigations().is_empty());

    ctx.loaded(PUBLISHED_URL).await;
    assert_eq!(ctx.queue.marked().len(), 1);
}

#[tokio::test]
async fn step_failure_from_the_page_stops_the_run() {
    let ctx = setup_with_rows([row(7)]);
    ctx.start().await;
    ctx.loaded(STORE_URL).await;

    ctx.runtime
        .process(Event::PageError {
            page: Some(ctx.page()),
            reason: "Could not find: Continue to uploader".to_string(),
        })
        .await
        .unwrap();

    let run = ctx.runtime.run();
    assert!(!run.running);
    assert!(run.current_row_id.is_none());
    assert_eq!(last_log(&ctx), "Stopped: Could not find: Continue to uploader");
    assert_eq!(
        ctx.runtime.outcome(),
        Some(RunOutcome::Stopped { reason: "Could not find: Continue to uploader".to_string() })
    );
}

#[tokio::test]
async fn empty_failure_reason_is_unknown_error() {
    let ctx = setup_with_rows([row(7)]);
    ctx.start().await;

    ctx.runtime
        .process(Event::PageError { page: None, reason: "  ".to_string() })
        .await
        .unwrap();

    assert_eq!(last_log(&ctx), "Stopped: Unknown error");
}

#[tokio::test]
async fn failures_from_other_pages_are_ignored() {
    let ctx = setup_with_rows([row(7)]);
    ctx.start().await;

    ctx.runtime
        .process(Event::PageError { page: Some(PageId::new("page-9")), reason: "boom".to_string() })
        .await
        .unwrap();

    assert!(ctx.runtime.run().running);
    assert_eq!(ctx.runtime.activity().count(LogKind::Error), 0);
}

#[tokio::test]
async fn operator_stop() {
    let ctx = setup_with_rows([row(7)]);
    ctx.start().await;
    ctx.loaded(STORE_URL).await;

    ctx.runtime.process(Event::RunStop { reason: "Stopped by operator.".to_string() }).await.unwrap();

    let run = ctx.runtime.run();
    assert!(!run.running);
    assert_eq!(run.phase, Phase::Idle);
    assert_eq!(last_log(&ctx), "Stopped: Stopped by operator.");
    assert!(ctx.pages.calls().iter().all(|c| !matches!(c, PageCall::Navigate { .. })));
}

#[tokio::test]
async fn stop_without_a_run_logs_nothing() {
    let ctx = setup();

    ctx.runtime.process(Event::RunStop { reason: "Stopped by operator.".to_string() }).await.unwrap();

    assert!(ctx.log_texts().is_empty());
    assert!(ctx.runtime.outcome().is_none());
}

#[tokio::test]
async fn return_to_store_failure_stops_the_run() {
    let ctx = setup_with_rows([row(7)]);
    ctx.start_and_reach_published().await;
    ctx.pages.close(&ctx.page());

    ctx.loaded(PUBLISHED_URL).await;

    assert_eq!(ctx.queue.marked(), [row_id(7)]);
    assert!(!ctx.runtime.run().running);
    assert_eq!(last_log(&ctx), "Stopped: Could not open the store page.");
}
