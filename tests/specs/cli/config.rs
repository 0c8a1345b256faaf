// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pubrun config` specs

use crate::prelude::*;

const STORE: &str = "https://store.example/design/copy";
const SOURCE: &str = "/home/op/designs.xlsx";

#[test]
fn show_on_fresh_state_reports_unset() {
    cli().args(&["config", "show"]).passes().stdout_has("(not set)");
}

#[test]
fn saved_settings_are_shown_back() {
    let state = State::empty();
    state
        .pubrun()
        .args(&["config", "save", "--store-url", STORE, "--source", SOURCE])
        .passes()
        .stdout_has("Saved settings.");

    state
        .pubrun()
        .args(&["config", "show"])
        .passes()
        .stdout_has(STORE)
        .stdout_has(SOURCE)
        .stdout_lacks("(not set)");
}

#[test]
fn save_strips_pasted_quotes() {
    let state = State::empty();
    let quoted = format!("\"{SOURCE}\"");
    state.pubrun().args(&["config", "save", "--store-url", STORE, "--source", &quoted]).passes();

    let run = state.pubrun().args(&["-o", "json", "config", "show"]).passes();
    let shown: serde_json::Value = serde_json::from_str(run.stdout()).unwrap();
    assert_eq!(shown["source_path"], SOURCE);
    assert_eq!(shown["store_url"], STORE);
}

#[test]
fn clear_forgets_settings() {
    let state = State::empty();
    state.pubrun().args(&["config", "save", "--store-url", STORE, "--source", SOURCE]).passes();
    assert!(state.file("settings.json").exists());

    state.pubrun().args(&["config", "clear"]).passes().stdout_has("Cleared settings.");
    assert!(!state.file("settings.json").exists());
    state.pubrun().args(&["config", "show"]).passes().stdout_has("(not set)");
}

#[test]
fn clear_without_saved_settings_passes() {
    cli().args(&["config", "clear"]).passes().stdout_has("Cleared settings.");
}

#[test]
fn corrupt_settings_file_is_an_error() {
    let state = State::empty();
    state.write("settings.json", "{not json");
    state.pubrun().args(&["config", "show"]).fails().stderr_has("settings.json");
}
