// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn state_dir_prefers_explicit_override() {
    std::env::set_var("PUBRUN_STATE_DIR", "/tmp/pubrun-state");
    std::env::set_var("XDG_STATE_HOME", "/tmp/xdg");

    assert_eq!(state_dir().unwrap(), PathBuf::from("/tmp/pubrun-state"));

    std::env::remove_var("PUBRUN_STATE_DIR");
    std::env::remove_var("XDG_STATE_HOME");
}

#[test]
#[serial]
fn state_dir_falls_back_to_xdg() {
    std::env::remove_var("PUBRUN_STATE_DIR");
    std::env::set_var("XDG_STATE_HOME", "/tmp/xdg");

    assert_eq!(state_dir().unwrap(), PathBuf::from("/tmp/xdg/pubrun"));

    std::env::remove_var("XDG_STATE_HOME");
}

#[test]
#[serial]
fn endpoints_default_when_unset() {
    std::env::remove_var("PUBRUN_QUEUE_URL");
    std::env::remove_var("PUBRUN_BROWSER_URL");
    std::env::set_var("PUBRUN_PUBLISHED_PATTERN", "  ");

    assert_eq!(queue_url(), "http://127.0.0.1:5000");
    assert_eq!(browser_url(), "http://127.0.0.1:9222");
    assert_eq!(published_pattern(), "teepublic.com/t-shirt/");

    std::env::remove_var("PUBRUN_PUBLISHED_PATTERN");
}

#[yare::parameterized(
    unset   = { None, 600_000 },
    valid   = { Some("1500"), 1_500 },
    zero    = { Some("0"), 600_000 },
    garbage = { Some("soon"), 600_000 },
)]
#[serial]
fn phase_timeout_parsing(value: Option<&str>, expected_ms: u64) {
    match value {
        Some(v) => std::env::set_var("PUBRUN_PHASE_TIMEOUT_MS", v),
        None => std::env::remove_var("PUBRUN_PHASE_TIMEOUT_MS"),
    }

    assert_eq!(phase_timeout(), Duration::from_millis(expected_ms));

    std::env::remove_var("PUBRUN_PHASE_TIMEOUT_MS");
}
