// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn one_row_round_trip() {
    let ctx = setup_with_rows([row(7)]);
    ctx.start().await;

    ctx.loaded(STORE_URL).await;
    assert_eq!(ctx.pages.dispatched(), [Instruction::StoreStep { id: row_id(7) }]);
    assert_eq!(ctx.runtime.run().phase, Phase::WaitingUploader);
    assert_eq!(ctx.runtime.run().current_row_id, Some(row_id(7)));

    ctx.loaded(UPLOADER_URL).await;
    assert_eq!(
        ctx.pages.dispatched().last(),
        Some(&Instruction::UploaderStep { row: row(7), source_path: SOURCE.to_string() })
    );
    assert_eq!(ctx.runtime.run().phase, Phase::WaitingPublished);

    ctx.loaded(PUBLISHED_URL).await;
    assert_eq!(ctx.queue.marked(), [row_id(7)]);
    assert!(ctx.queue.calls().contains(&QueueCall::MarkDone {
        source_path: SOURCE.to_string(),
        id: row_id(7)
    }));

    let run = ctx.runtime.run();
    assert!(run.running);
    assert_eq!(run.phase, Phase::WaitingStore);
    assert!(run.current_row_id.is_none());
    assert!(run.current_row.is_none());
    assert_eq!(run.completed, 1);
    assert_eq!(ctx.pages.navigations(), [(ctx.page(), STORE_URL.to_string())]);
    assert_eq!(
        ctx.log_texts(),
        [
            "Starting…",
            "Store page loaded. Getting next row…",
            "Processing Id=7",
            "Page loaded after store step. Trying uploader step…",
            "Published page detected. Marking Done…",
            "Marked Done for Id=7",
        ]
    );
}

#[tokio::test]
async fn queue_exhaustion_finishes_the_run() {
    let ctx = setup();
    ctx.start().await;

    ctx.loaded(STORE_URL).await;

    let run = ctx.runtime.run();
    assert!(!run.running);
    assert_eq!(run.phase, Phase::Idle);
    assert_eq!(ctx.runtime.outcome(), Some(RunOutcome::Exhausted));
    assert!(ctx.queue.marked().is_empty());
    assert_eq!(ctx.runtime.activity().count(LogKind::Error), 0);
    let done = ctx
        .runtime
        .activity()
        .snapshot()
        .iter()
        .filter(|e| e.kind == LogKind::Ok && e.text == "No rows left. Done.")
        .count();
    assert_eq!(done, 1);
    assert_eq!(ctx.log_texts().last().map(String::as_str), Some("No rows left. Done."));
}

#[tokio::test]
async fn no_queue_calls_after_exhaustion() {
    let ctx = setup();
    ctx.start().await;
    ctx.loaded(STORE_URL).await;
    let calls = ctx.queue.calls().len();

    ctx.loaded(STORE_URL).await;
    ctx.loaded(PUBLISHED_URL).await;

    assert_eq!(ctx.queue.calls().len(), calls);
    assert!(ctx.pages.dispatched().is_empty());
}

#[tokio::test]
async fn two_rows_then_done() {
    let ctx = setup_with_rows([row(1), row(2)]);
    ctx.start().await;

    for _ in 0..2 {
        ctx.loaded(STORE_URL).await;
        ctx.loaded(UPLOADER_URL).await;
        ctx.loaded(PUBLISHED_URL).await;
    }
    ctx.loaded(STORE_URL).await;

    assert_eq!(ctx.queue.marked(), [row_id(1), row_id(2)]);
    assert_eq!(ctx.runtime.outcome(), Some(RunOutcome::Exhausted));
    assert_eq!(ctx.runtime.run().completed, 2);
}

#[tokio::test]
async fn published_phase_ignores_other_addresses() {
    let ctx = setup_with_rows([row(7)]);
    ctx.start_and_reach_published().await;
    let before = ctx.runtime.run();

    for url in [UPLOADER_URL, "https://www.teepublic.com/users/me/designs", ""] {
        ctx.loaded(url).await;
        assert_eq!(ctx.runtime.run(), before, "{url:?} must not advance the run");
    }
    assert!(ctx.queue.marked().is_empty());

    ctx.loaded(PUBLISHED_URL).await;
    assert_eq!(ctx.queue.marked(), [row_id(7)]);
}

#[tokio::test]
async fn custom_published_pattern() {
    let config = RuntimeConfig::default().published_pattern("example.com/done/");
    let ctx = setup_with([row(3)], config);
    ctx.start_and_reach_published().await;

    ctx.loaded(PUBLISHED_URL).await;
    assert!(ctx.queue.marked().is_empty());

    ctx.loaded("https://example.com/done/3").await;
    assert_eq!(ctx.queue.marked(), [row_id(3)]);
}

#[tokio::test]
async fn blank_published_pattern_keeps_the_default() {
    for pattern in ["", "   "] {
        let config = RuntimeConfig::default().published_pattern(pattern);
        let ctx = setup_with([row(3)], config);
        ctx.start_and_reach_published().await;

        ctx.loaded("https://www.teepublic.com/design/upload").await;
        assert!(ctx.queue.marked().is_empty(), "pattern {pattern:?}");
        assert_eq!(ctx.runtime.run().phase, Phase::WaitingPublished);

        ctx.loaded(PUBLISHED_URL).await;
        assert_eq!(ctx.queue.marked(), [row_id(3)]);
    }
}

#[tokio::test]
async fn page_loads_are_ignored_without_a_run() {
    let ctx = setup_with_rows([row(7)]);

    for url in [STORE_URL, UPLOADER_URL, PUBLISHED_URL] {
        ctx.loaded(url).await;
    }

    assert!(ctx.queue.calls().is_empty());
    assert!(ctx.pages.calls().is_empty());
    assert!(ctx.log_texts().is_empty());
}

#[tokio::test]
async fn page_loads_are_ignored_after_a_stop() {
    let ctx = setup_with_rows([row(7)]);
    ctx.start().await;
    ctx.runtime.process(Event::RunStop { reason: "Stopped by operator.".to_string() }).await.unwrap();
    let queue_calls = ctx.queue.calls().len();

    ctx.loaded(STORE_URL).await;

    assert_eq!(ctx.queue.calls().len(), queue_calls);
    assert!(ctx.pages.dispatched().is_empty());
}

#[tokio::test]
async fn loads_on_other_pages_are_ignored() {
    let ctx = setup_with_rows([row(7)]);
    ctx.start().await;

    ctx.runtime
        .process(Event::PageLoaded { page: PageId::new("page-9"), url: STORE_URL.to_string() })
        .await
        .unwrap();

    assert_eq!(ctx.queue.calls(), [QueueCall::Ping]);
    assert_eq!(ctx.runtime.run().phase, Phase::WaitingStore);
}

#[tokio::test]
async fn progress_lines_from_steps_reach_the_log() {
    let ctx = setup_with_rows([row(7)]);
    ctx.start().await;

    ctx.runtime
        .process(Event::LogLine { text: "Image selected.".to_string(), kind: LogKind::Ok })
        .await
        .unwrap();

    let last = ctx.runtime.activity().snapshot().tail(1);
    assert_eq!(last[0].text, "Image selected.");
    assert_eq!(last[0].kind, LogKind::Ok);
}
