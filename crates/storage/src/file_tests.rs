// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::{json, Value};
use tempfile::tempdir;

#[test]
fn missing_file_reads_as_none() {
    let dir = tempdir().unwrap();
    let value: Option<Value> = read_json(&dir.path().join("absent.json")).unwrap();
    assert!(value.is_none());
}

#[test]
fn write_creates_parent_and_leaves_no_temp_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("doc.json");

    write_json(&path, &json!({"a": 1})).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
    let value: Option<Value> = read_json(&path).unwrap();
    assert_eq!(value, Some(json!({"a": 1})));
}

#[test]
fn write_replaces_existing_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.json");

    write_json(&path, &json!("first")).unwrap();
    write_json(&path, &json!("second")).unwrap();

    let value: Option<Value> = read_json(&path).unwrap();
    assert_eq!(value, Some(json!("second")));
}

#[test]
fn malformed_document_is_a_json_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = read_json::<Value>(&path).unwrap_err();
    assert!(matches!(err, StorageError::Json { .. }), "got {err:?}");
    assert_eq!(err.path(), path);
}

#[test]
fn remove_missing_file_is_ok() {
    let dir = tempdir().unwrap();
    remove(&dir.path().join("absent.json")).unwrap();
}
