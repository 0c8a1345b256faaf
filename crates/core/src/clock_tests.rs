// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_epoch_is_after_2020() {
    assert!(SystemClock.epoch_ms() > 1_577_836_800_000);
}

#[test]
fn fake_clock_advances_both_time_sources() {
    let clock = FakeClock::at_epoch_ms(5_000);
    let t1 = clock.now();
    clock.advance(Duration::from_secs(60));

    assert!(clock.now().duration_since(t1) >= Duration::from_secs(60));
    assert_eq!(clock.epoch_ms(), 65_000);
}

#[test]
fn fake_clock_clones_share_time() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    let before = clock1.epoch_ms();

    clock2.advance(Duration::from_millis(250));

    assert_eq!(clock1.epoch_ms(), before + 250);
}
