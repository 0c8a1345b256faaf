// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pubrun_core::{Clock, FakeClock, Phase};

#[test]
fn scheduler_timer_lifecycle() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();

    scheduler.set_timer("test".to_string(), Duration::from_secs(10), clock.now());
    assert!(scheduler.has_timers());
    assert!(scheduler.next_deadline().is_some());

    clock.advance(Duration::from_secs(5));
    assert!(scheduler.fired_timers(clock.now()).is_empty());
    assert!(scheduler.has_timers());

    clock.advance(Duration::from_secs(10));
    let events = scheduler.fired_timers(clock.now());
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Event::TimerStart { ref id } if id == "test"));
    assert!(!scheduler.has_timers());
}

#[test]
fn scheduler_cancel_timer() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();

    scheduler.set_timer("test".to_string(), Duration::from_secs(10), clock.now());
    scheduler.cancel_timer("test");

    clock.advance(Duration::from_secs(15));
    assert!(scheduler.fired_timers(clock.now()).is_empty());
}

#[test]
fn resetting_a_timer_moves_its_deadline() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();
    let id = TimerId::watchdog(Phase::WaitingStore).to_string();

    scheduler.set_timer(id.clone(), Duration::from_secs(10), clock.now());
    clock.advance(Duration::from_secs(8));
    scheduler.set_timer(id, Duration::from_secs(10), clock.now());

    clock.advance(Duration::from_secs(5));
    assert!(scheduler.fired_timers(clock.now()).is_empty());
    clock.advance(Duration::from_secs(5));
    assert_eq!(scheduler.fired_timers(clock.now()).len(), 1);
}

#[test]
fn fired_timers_come_out_in_deadline_order() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();
    scheduler.set_timer("late".to_string(), Duration::from_secs(20), clock.now());
    scheduler.set_timer("early".to_string(), Duration::from_secs(10), clock.now());

    clock.advance(Duration::from_secs(30));
    let ids: Vec<String> = scheduler
        .fired_timers(clock.now())
        .into_iter()
        .filter_map(|e| match e {
            Event::TimerStart { id } => Some(id.to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(ids, ["early", "late"]);
}
