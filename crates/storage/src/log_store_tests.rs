// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pubrun_core::{LogEntry, LogKind, LOG_CAPACITY};
use tempfile::tempdir;

fn buffer(lines: &[(&str, LogKind)]) -> LogBuffer {
    let mut buffer = LogBuffer::new();
    for (i, (text, kind)) in lines.iter().enumerate() {
        buffer.push(LogEntry::new(1_000 + i as u64, *text, *kind));
    }
    buffer
}

#[test]
fn load_without_file_is_empty() {
    let dir = tempdir().unwrap();
    assert!(LogStore::new(dir.path()).load().unwrap().is_empty());
}

#[test]
fn persisted_entries_survive_reload() {
    let dir = tempdir().unwrap();
    let store = LogStore::new(dir.path());
    let saved = buffer(&[("Starting…", LogKind::Ok), ("Processing Id=7", LogKind::Info)]);

    store.persist(&saved);

    let loaded = LogStore::new(dir.path()).load().unwrap();
    assert_eq!(loaded, saved);
}

#[test]
fn reload_keeps_only_the_newest_entries() {
    let dir = tempdir().unwrap();
    let entries: Vec<LogEntry> = (0..LOG_CAPACITY as u64 + 20)
        .map(|i| LogEntry::new(i, format!("line {i}"), LogKind::Info))
        .collect();
    std::fs::write(dir.path().join("logs.json"), serde_json::to_string(&entries).unwrap())
        .unwrap();

    let loaded = LogStore::new(dir.path()).load().unwrap();
    assert_eq!(loaded.len(), LOG_CAPACITY);
    assert_eq!(loaded.iter().next().map(|e| e.text.as_str()), Some("line 20"));
}

#[test]
fn corrupt_file_is_moved_aside() {
    let dir = tempdir().unwrap();
    let store = LogStore::new(dir.path());
    std::fs::write(store.path(), "[{\"at_ms\": ").unwrap();

    let loaded = store.load().unwrap();

    assert!(loaded.is_empty());
    assert!(!store.path().exists());
    assert!(dir.path().join("logs.bak").exists());
}

#[test]
fn clear_removes_the_file() {
    let dir = tempdir().unwrap();
    let store = LogStore::new(dir.path());
    store.persist(&buffer(&[("Stopped: Stopped by operator.", LogKind::Error)]));

    store.clear().unwrap();

    assert!(!store.path().exists());
    assert!(store.load().unwrap().is_empty());
}
