// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn start_opens_the_store_page_and_waits() {
    let ctx = setup_with_rows([row(7)]);

    ctx.start().await;

    let run = ctx.runtime.run();
    assert!(run.running);
    assert_eq!(run.phase, Phase::WaitingStore);
    assert_eq!(run.store_url, STORE_URL);
    assert_eq!(run.source_path, SOURCE);
    assert_eq!(run.page, Some(ctx.page()));
    assert_eq!(
        ctx.pages.opens(),
        [PageCall::Open { reuse: None, url: STORE_URL.to_string(), page: ctx.page() }]
    );
    assert_eq!(ctx.queue.calls(), [QueueCall::Ping]);
    assert_eq!(ctx.log_texts(), ["Starting…"]);
}

#[tokio::test]
async fn unreachable_server_never_starts_the_run() {
    let ctx = setup_with_rows([row(7)]);
    ctx.queue.fail_ping(queue_down());

    ctx.start().await;

    let run = ctx.runtime.run();
    assert!(!run.running);
    assert_eq!(run.phase, Phase::Idle);
    assert!(run.store_url.is_empty());
    assert!(ctx.pages.calls().is_empty(), "no page may be opened");
    assert_eq!(ctx.runtime.activity().count(LogKind::Error), 1);
    assert_eq!(
        ctx.log_texts().last().map(String::as_str),
        Some("Stopped: Server not connected on 127.0.0.1:5000")
    );
    assert_eq!(
        ctx.runtime.outcome(),
        Some(RunOutcome::Stopped { reason: "Server not connected on 127.0.0.1:5000".to_string() })
    );
}

#[tokio::test]
async fn second_run_reuses_the_controlled_page() {
    let ctx = setup_with_rows([row(1)]);
    ctx.start().await;
    ctx.runtime.process(Event::RunStop { reason: "Stopped by operator.".to_string() }).await.unwrap();

    ctx.start().await;

    let opens = ctx.pages.opens();
    assert_eq!(opens.len(), 2);
    assert_eq!(
        opens[1],
        PageCall::Open { reuse: Some(ctx.page()), url: STORE_URL.to_string(), page: ctx.page() }
    );
    assert_eq!(ctx.runtime.controlled_page(), Some(ctx.page()));
}

#[tokio::test]
async fn closed_page_is_replaced_on_start() {
    let ctx = setup_with_rows([row(1)]);
    ctx.start().await;
    ctx.pages.close(&ctx.page());

    ctx.start().await;

    assert_eq!(ctx.runtime.run().page, Some(PageId::new("page-2")));
    assert_eq!(ctx.runtime.controlled_page(), Some(PageId::new("page-2")));
}

#[tokio::test]
async fn start_during_a_run_restarts_it() {
    let ctx = setup_with_rows([row(1), row(2)]);
    ctx.start().await;
    ctx.loaded(STORE_URL).await;
    assert_eq!(ctx.runtime.run().phase, Phase::WaitingUploader);

    ctx.start().await;

    let run = ctx.runtime.run();
    assert_eq!(run.phase, Phase::WaitingStore);
    assert!(run.current_row_id.is_none());
    assert!(ctx.log_texts().contains(&"Restarting…".to_string()));
    assert_eq!(ctx.runtime.activity().count(LogKind::Error), 0);
}

#[tokio::test]
async fn open_failure_stops_the_run() {
    let ctx = setup_with_rows([row(1)]);
    ctx.pages.fail_open(PageError::Browser("cannot reach browser".to_string()));

    ctx.start().await;

    assert!(!ctx.runtime.run().running);
    assert_eq!(
        ctx.log_texts().last().map(String::as_str),
        Some("Stopped: Could not open the store page.")
    );
}
