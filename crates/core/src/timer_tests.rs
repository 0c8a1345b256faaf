// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    store     = { Phase::WaitingStore },
    uploader  = { Phase::WaitingUploader },
    published = { Phase::WaitingPublished },
)]
fn watchdog_id_roundtrips_phase(phase: Phase) {
    let id = TimerId::watchdog(phase);
    assert!(id.is_watchdog());
    assert_eq!(id.watchdog_phase(), Some(phase));
}

#[test]
fn unknown_timer_has_no_phase() {
    let id = TimerId::new("watchdog:lunch");
    assert!(id.is_watchdog());
    assert_eq!(id.watchdog_phase(), None);
    assert_eq!(TimerId::new("other").watchdog_phase(), None);
}
