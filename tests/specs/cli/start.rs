// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pubrun start` specs that need neither a queue server nor a browser.

use crate::prelude::*;

const STORE: &str = "https://store.example/design/copy";
const SOURCE: &str = "/home/op/designs.xlsx";

#[test]
fn start_without_settings_asks_for_them() {
    cli().args(&["start"]).fails().code(1).stderr_has("Please set Store Link and Source Path.");
}

#[test]
fn start_with_only_a_store_link_is_rejected() {
    cli()
        .args(&["start", "--store-url", STORE])
        .fails()
        .code(1)
        .stderr_has("Please set Store Link and Source Path.");
}

#[test]
fn quoted_empty_source_counts_as_missing() {
    cli()
        .args(&["start", "--store-url", STORE, "--source", "\"\""])
        .fails()
        .code(1)
        .stderr_has("Please set Store Link and Source Path.");
}

#[test]
fn unreachable_queue_server_stops_the_run() {
    let state = State::empty();
    let server = dead_server();
    let label = server.trim_start_matches("http://").to_string();

    state
        .pubrun()
        .args(&["start", "--store-url", STORE, "--source", SOURCE])
        .env("PUBRUN_QUEUE_URL", &server)
        .env("PUBRUN_BROWSER_URL", &dead_server())
        .fails()
        .code(1)
        .stdout_has("Starting…")
        .stdout_has(&format!("Stopped: Server not connected on {label}"));

    // Flags given to start are remembered for the next run.
    state.pubrun().args(&["config", "show"]).passes().stdout_has(STORE).stdout_has(SOURCE);

    // The stop is retained in the activity log.
    state
        .pubrun()
        .args(&["logs"])
        .passes()
        .stdout_has(&format!("Stopped: Server not connected on {label}"));
}

#[test]
fn start_uses_saved_settings() {
    let state = State::empty();
    state.pubrun().args(&["config", "save", "--store-url", STORE, "--source", SOURCE]).passes();

    state
        .pubrun()
        .args(&["start"])
        .env("PUBRUN_QUEUE_URL", &dead_server())
        .env("PUBRUN_BROWSER_URL", &dead_server())
        .fails()
        .code(1)
        .stdout_has("Server not connected");
}
