// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn started() -> Run {
    Run::start("https://store.example/design/1", "C:\\sheet.xlsx", 1_000)
}

#[test]
fn start_enters_waiting_store() {
    let run = started();
    assert!(run.running);
    assert!(run.is_active());
    assert_eq!(run.phase, Phase::WaitingStore);
    assert_eq!(run.started_at_ms, 1_000);
    assert!(run.page.is_none());
    assert!(run.current_row_id.is_none());
}

#[test]
fn default_run_is_idle() {
    let run = Run::default();
    assert!(!run.running);
    assert!(!run.is_active());
    assert_eq!(run.phase, Phase::Idle);
}

#[test]
fn advance_follows_the_cycle() {
    let mut run = started();
    assert!(!run.advance(Phase::WaitingPublished));
    assert_eq!(run.phase, Phase::WaitingStore);

    assert!(run.advance(Phase::WaitingUploader));
    assert!(run.advance(Phase::WaitingPublished));
    assert!(run.advance(Phase::WaitingStore));
    assert_eq!(run.phase, Phase::WaitingStore);
}

#[test]
fn advance_refused_when_not_running() {
    let mut run = started();
    run.halt(false);
    assert!(!run.advance(Phase::WaitingStore));
    assert_eq!(run.phase, Phase::Idle);
}

#[test]
fn finish_row_counts_completion() {
    let mut run = started();
    run.load_row(Row::builder().id(7u64).build());
    assert_eq!(run.current_row_id, Some(RowId::from("7")));

    assert_eq!(run.finish_row(), Some(RowId::from("7")));
    assert!(run.current_row.is_none());
    assert_eq!(run.completed, 1);

    assert_eq!(run.finish_row(), None);
    assert_eq!(run.completed, 1);
}

#[yare::parameterized(
    clears  = { false, false },
    retains = { true, true },
)]
fn halt_row_retention(retain: bool, expect_row: bool) {
    let mut run = started();
    run.load_row(Row::builder().id(3u64).build());
    run.halt(retain);

    assert!(!run.running);
    assert_eq!(run.phase, Phase::Idle);
    assert_eq!(run.current_row_id.is_some(), expect_row);
    assert_eq!(run.current_row.is_some(), expect_row);
}

#[test]
fn owns_only_its_page() {
    let mut run = started();
    let page = PageId::new("tab-1");
    assert!(!run.owns(&page));
    run.page = Some(page.clone());
    assert!(run.owns(&page));
    assert!(!run.owns(&PageId::new("tab-2")));
}
