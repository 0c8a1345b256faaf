// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pubrun_core::TimerId;
use std::time::Duration;

async fn fire(ctx: &TestContext, by: Duration) {
    for event in ctx.fire_timers(by) {
        ctx.runtime.process(event).await.unwrap();
    }
}

#[tokio::test]
async fn start_arms_the_store_watchdog() {
    let ctx = setup_with_rows([row(7)]);
    ctx.start().await;

    assert_eq!(ctx.pending_timer_ids(), [TimerId::watchdog(Phase::WaitingStore).to_string()]);
}

#[tokio::test]
async fn each_phase_rearms_a_single_watchdog() {
    let ctx = setup_with_rows([row(7)]);
    ctx.start().await;
    ctx.loaded(STORE_URL).await;

    assert_eq!(ctx.pending_timer_ids(), [TimerId::watchdog(Phase::WaitingUploader).to_string()]);
}

#[tokio::test]
async fn stuck_phase_times_out() {
    let ctx = setup_with_rows([row(7)]);
    ctx.start().await;
    ctx.loaded(STORE_URL).await;

    fire(&ctx, DEFAULT_PHASE_TIMEOUT + Duration::from_secs(1)).await;

    let run = ctx.runtime.run();
    assert!(!run.running);
    assert_eq!(
        ctx.log_texts().last().map(String::as_str),
        Some("Stopped: Timed out waiting for the uploader page.")
    );
}

#[tokio::test]
async fn progress_resets_the_deadline() {
    let config = RuntimeConfig::default().phase_timeout(Duration::from_secs(60));
    let ctx = setup_with([row(7)], config);
    ctx.start().await;

    fire(&ctx, Duration::from_secs(45)).await;
    ctx.loaded(STORE_URL).await;
    fire(&ctx, Duration::from_secs(45)).await;

    assert!(ctx.runtime.run().running);
    assert_eq!(ctx.runtime.run().phase, Phase::WaitingUploader);

    fire(&ctx, Duration::from_secs(20)).await;
    assert!(!ctx.runtime.run().running);
}

#[tokio::test]
async fn halting_cancels_the_watchdog() {
    let ctx = setup();
    ctx.start().await;
    ctx.loaded(STORE_URL).await;

    assert!(ctx.pending_timer_ids().is_empty());
    assert_eq!(ctx.runtime.outcome(), Some(RunOutcome::Exhausted));
}

#[tokio::test]
async fn stale_watchdog_is_ignored() {
    let ctx = setup_with_rows([row(7)]);
    ctx.start().await;
    ctx.loaded(STORE_URL).await;

    ctx.runtime
        .process(Event::TimerStart { id: TimerId::watchdog(Phase::WaitingStore) })
        .await
        .unwrap();

    assert!(ctx.runtime.run().running);
    assert_eq!(ctx.runtime.activity().count(LogKind::Error), 0);
}
