// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[yare::parameterized(
    integer = { json!(7), "7" },
    float   = { json!(7.5), "7.5" },
    text    = { json!("A-12"), "A-12" },
)]
fn row_id_accepts_numbers_and_text(raw: Value, expected: &str) {
    let id: RowId = serde_json::from_value(raw).unwrap();
    assert_eq!(id.as_str(), expected);
}

#[test]
fn row_id_serializes_as_text() {
    assert_eq!(serde_json::to_value(RowId::from(7u64)).unwrap(), json!("7"));
}

#[test]
fn row_decodes_sheet_headers() {
    let row: Row = serde_json::from_value(json!({
        "Id": 3,
        "Image_Path": "\"C:\\designs\\cat.png\"",
        "Title": "Cat",
        "Description": null,
        "Main_Tag": "cats",
        "Tags": "cute, kitten ,, animals",
        "Status": null
    }))
    .unwrap();

    assert_eq!(row.id, RowId::from(3u64));
    assert_eq!(row.title, "Cat");
    assert_eq!(row.description, "");
    assert_eq!(row.tags(), ["cute", "kitten", "animals"]);
    assert!(row.extra.contains_key("Status"));
}

#[test]
fn row_missing_cells_default_to_empty() {
    let row: Row = serde_json::from_value(json!({ "Id": "9" })).unwrap();
    assert_eq!(row.image_path, "");
    assert_eq!(row.main_tag, "");
    assert!(row.tags().is_empty());
}

#[test]
fn row_numeric_cells_become_text() {
    let row: Row = serde_json::from_value(json!({ "Id": 1, "Title": 1984, "Tags": 42 })).unwrap();
    assert_eq!(row.title, "1984");
    assert_eq!(row.tags(), ["42"]);
}

#[test]
fn row_tags_accept_a_list() {
    let row: Row =
        serde_json::from_value(json!({ "Id": 1, "Tags": ["a", " b ", "", null] })).unwrap();
    assert_eq!(row.tags(), ["a", "b"]);
}

#[test]
fn row_without_id_is_rejected() {
    let result: Result<Row, _> = serde_json::from_value(json!({ "Title": "orphan" }));
    assert!(result.is_err());
}

#[test]
fn row_snapshot_passes_through_unknown_columns() {
    let raw = json!({ "Id": "5", "Title": "x", "Status": "Pending", "Notes": "keep" });
    let row: Row = serde_json::from_value(raw).unwrap();
    let back = serde_json::to_value(&row).unwrap();
    assert_eq!(back["Status"], "Pending");
    assert_eq!(back["Notes"], "keep");
    assert_eq!(back["Id"], "5");
}

#[test]
fn builder_defaults_are_usable() {
    let row = Row::builder().id(42u64).tags(["a", "b"].into_iter().collect()).build();
    assert_eq!(row.id.as_str(), "42");
    assert_eq!(row.tags().len(), 2);
}
