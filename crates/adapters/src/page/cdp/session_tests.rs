// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn reply_with_result() {
    let frame = parse_frame(r#"{"id": 3, "result": {"frameId": "F"}}"#);
    assert_eq!(frame, Frame::Reply { id: 3, result: Ok(json!({"frameId": "F"})) });
}

#[test]
fn reply_with_error() {
    let frame = parse_frame(r#"{"id": 4, "error": {"code": -32000, "message": "No target"}}"#);
    assert_eq!(
        frame,
        Frame::Reply { id: 4, result: Err(CdpError::Protocol("No target".to_string())) }
    );
}

#[test]
fn main_frame_navigation_tracks_url() {
    let frame = parse_frame(
        r#"{"method": "Page.frameNavigated", "params": {"frame": {"id": "F", "url": "https://www.teepublic.com/t-shirt/1-cat"}}}"#,
    );
    assert_eq!(frame, Frame::Navigated { url: "https://www.teepublic.com/t-shirt/1-cat".to_string() });
}

#[test]
fn child_frame_navigation_is_ignored() {
    let frame = parse_frame(
        r#"{"method": "Page.frameNavigated", "params": {"frame": {"id": "C", "parentId": "F", "url": "https://ads.example/"}}}"#,
    );
    assert_eq!(frame, Frame::Other);
}

#[yare::parameterized(
    loaded   = { r#"{"method": "Page.loadEventFired", "params": {"timestamp": 1.5}}"#, Frame::Loaded },
    detached = { r#"{"method": "Inspector.detached", "params": {"reason": "target_closed"}}"#, Frame::Detached },
    other    = { r#"{"method": "Page.domContentEventFired", "params": {}}"#, Frame::Other },
    garbage  = { "not json", Frame::Other },
)]
fn protocol_events(text: &str, expected: Frame) {
    assert_eq!(parse_frame(text), expected);
}
