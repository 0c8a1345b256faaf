// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work-queue rows.
//!
//! A row is one spreadsheet line served by the queue. Field names follow the
//! sheet headers (`Id`, `Image_Path`, ...). Cells may be empty, numeric, or
//! text, so every text field is read leniently.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Identifier of a row.
///
/// Sheets usually store ids as numbers while callers pass them around as
/// text; both forms deserialize, and the textual form of a number is kept
/// verbatim so the queue server can compare it against the cell value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId")]
pub struct RowId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for RowId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        }
    }
}

impl RowId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RowId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for RowId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

/// Tags of a row: either a comma-separated cell or a JSON list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawTags")]
pub struct TagList(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTags {
    Text(String),
    List(Vec<Value>),
    Other(Value),
}

impl From<RawTags> for TagList {
    fn from(raw: RawTags) -> Self {
        let tags = match raw {
            RawTags::Text(s) => s.split(',').map(str::trim).map(String::from).collect(),
            RawTags::List(values) => values.iter().map(value_text).collect(),
            RawTags::Other(value) => vec![value_text(&value)],
        };
        Self(tags.into_iter().map(|t| t.trim().to_string()).filter(|t| !t.is_empty()).collect())
    }
}

impl TagList {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S: Into<String>> FromIterator<S> for TagList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn cell_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().map(value_text).unwrap_or_default())
}

/// One unit of work fetched from the queue.
///
/// Immutable once fetched. Columns the workflow does not use (e.g. `Status`)
/// are kept in `extra` so the snapshot passes through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "Id")]
    pub id: RowId,
    #[serde(rename = "Image_Path", default, deserialize_with = "cell_text")]
    pub image_path: String,
    #[serde(rename = "Title", default, deserialize_with = "cell_text")]
    pub title: String,
    #[serde(rename = "Description", default, deserialize_with = "cell_text")]
    pub description: String,
    #[serde(rename = "Main_Tag", default, deserialize_with = "cell_text")]
    pub main_tag: String,
    #[serde(rename = "Tags", default)]
    pub tags: TagList,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Row {
    /// Secondary tags in sheet order, trimmed, without empties.
    pub fn tags(&self) -> &[String] {
        self.tags.as_slice()
    }
}

crate::builder! {
    pub struct RowBuilder => Row {
        into {
            id: RowId = "1",
            image_path: String = "C:\\designs\\1.png",
            title: String = "Test design",
            description: String = "A test design",
            main_tag: String = "cats",
        }
        set {
            tags: TagList = TagList::default(),
        }
        computed {
            extra: Map<String, Value> = Map::new(),
        }
    }
}

#[cfg(test)]
#[path = "row_tests.rs"]
mod tests;
