// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn pubrun_binary_is_found_in_the_target_dir() {
    let bin = pubrun_bin();
    assert!(bin.is_file(), "{} is missing; build the workspace first", bin.display());
}

#[test]
fn pubrun_help_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:");
}

#[test]
fn pubrun_help_lists_commands() {
    cli().args(&["--help"]).passes().stdout_has("config").stdout_has("start").stdout_has("logs");
}

#[test]
fn pubrun_no_args_fails_with_usage() {
    cli().fails().code(2).stderr_has("Usage:");
}

#[test]
fn pubrun_config_help_shows_subcommands() {
    cli()
        .args(&["config", "--help"])
        .passes()
        .stdout_has("save")
        .stdout_has("show")
        .stdout_has("clear");
}

#[test]
fn pubrun_start_help_shows_flags() {
    cli().args(&["start", "--help"]).passes().stdout_has("--store-url").stdout_has("--source");
}

#[test]
fn pubrun_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}
