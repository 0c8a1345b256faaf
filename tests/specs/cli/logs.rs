// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pubrun logs` specs

use crate::prelude::*;

const RETAINED: &str = r#"[
  {"at_ms": 1000, "text": "Starting…", "kind": "ok"},
  {"at_ms": 2000, "text": "Processing Id=7", "kind": "ok"},
  {"at_ms": 3000, "text": "Stopped: Timed out waiting for the uploader page.", "kind": "error"}
]"#;

#[test]
fn empty_state_has_no_entries() {
    cli().args(&["logs"]).passes().stdout_has("No log entries.");
}

#[test]
fn retained_entries_are_printed_in_order() {
    let state = State::empty();
    state.write("logs.json", RETAINED);

    let run = state.pubrun().args(&["logs"]).passes();
    let out = run.stdout();
    let starting = out.find("Starting…").unwrap();
    let processing = out.find("Processing Id=7").unwrap();
    let stopped = out.find("Stopped: Timed out waiting for the uploader page.").unwrap();
    assert!(starting < processing && processing < stopped, "{out}");
}

#[test]
fn limit_keeps_the_newest_entries() {
    let state = State::empty();
    state.write("logs.json", RETAINED);

    state
        .pubrun()
        .args(&["logs", "-n", "1"])
        .passes()
        .stdout_has("Stopped: Timed out")
        .stdout_lacks("Starting…");
}

#[test]
fn json_output_lists_entries() {
    let state = State::empty();
    state.write("logs.json", RETAINED);

    let run = state.pubrun().args(&["-o", "json", "logs"]).passes();
    let entries: serde_json::Value = serde_json::from_str(run.stdout()).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2]["kind"], "error");
}

#[test]
fn clear_empties_the_log() {
    let state = State::empty();
    state.write("logs.json", RETAINED);

    state.pubrun().args(&["logs", "--clear"]).passes().stdout_has("Cleared logs.");
    state.pubrun().args(&["logs"]).passes().stdout_has("No log entries.");
}

#[test]
fn corrupt_log_is_moved_aside() {
    let state = State::empty();
    state.write("logs.json", "[{broken");

    state.pubrun().args(&["logs"]).passes().stdout_has("No log entries.");
    assert!(state.file("logs.bak").exists());
    assert!(!state.file("logs.json").exists());
}
