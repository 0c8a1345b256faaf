// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work-queue client.
//!
//! The queue is a small local HTTP service in front of a spreadsheet: it
//! hands out the first row not yet marked done and flips a row's status on
//! request. Callers never retry; a failed mark-done may already have been
//! applied on the server.

mod http;

pub use http::HttpQueueClient;

use async_trait::async_trait;
use pubrun_core::{Row, RowId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base URL of the local queue service.
pub const DEFAULT_QUEUE_URL: &str = "http://127.0.0.1:5000";

/// Errors from queue operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("server unreachable: {0}")]
    Unreachable(String),
    #[error("{endpoint} HTTP {status}")]
    Status { endpoint: String, status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Answer to a next-row request
#[derive(Debug, Clone, PartialEq)]
pub enum NextRow {
    Row(Box<Row>),
    /// The queue has no rows left to hand out
    Exhausted { message: String },
}

impl NextRow {
    /// Interpret a next-row response body.
    ///
    /// A JSON object whose `message` mentions "No rows" means the queue is
    /// empty; anything else must be a row carrying an `Id`.
    pub fn from_json(value: serde_json::Value) -> Result<Self, QueueError> {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            if message.contains("No rows") {
                return Ok(NextRow::Exhausted { message: message.to_string() });
            }
        }
        if value.get("Id").map_or(true, |id| id.is_null()) {
            return Err(QueueError::Decode(format!("row without Id: {value}")));
        }
        let row: Row =
            serde_json::from_value(value).map_err(|e| QueueError::Decode(e.to_string()))?;
        Ok(NextRow::Row(Box::new(row)))
    }
}

/// Acknowledgement of a mark-done request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub updated_id: Option<RowId>,
}

/// Raw bytes of a design file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBytes {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FileBytes {
    pub const DEFAULT_NAME: &'static str = "design.png";
    pub const DEFAULT_MIME: &'static str = "image/png";

    /// Build from a source path, falling back to default name and mime.
    pub fn from_path(path: &str, mime: Option<&str>, bytes: Vec<u8>) -> Self {
        let name = pubrun_core::text::file_name(path).unwrap_or(Self::DEFAULT_NAME);
        let mime = mime.map(str::trim).filter(|m| !m.is_empty()).unwrap_or(Self::DEFAULT_MIME);
        Self { name: name.to_string(), mime: mime.to_string(), bytes }
    }
}

/// Adapter for the work-queue service
#[async_trait]
pub trait QueueAdapter: Clone + Send + Sync + 'static {
    /// Liveness probe; `Ok` iff the service answers with success.
    async fn ping(&self) -> Result<(), QueueError>;

    /// Fetch the first row not yet marked done.
    async fn next_row(&self, source_path: &str) -> Result<NextRow, QueueError>;

    /// Mark a row done. Not safe to retry.
    async fn mark_done(&self, source_path: &str, id: &RowId) -> Result<Ack, QueueError>;

    /// Download a file served by the queue.
    async fn fetch_file(&self, path: &str) -> Result<FileBytes, QueueError>;

    /// Base URL, for operator-facing messages.
    fn base_url(&self) -> String;
}

#[cfg(any(test, feature = "test-support"))]
mod fake;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeQueueAdapter, QueueCall};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
