// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator-facing activity log entries and the bounded buffer that keeps them.
//!
//! The activity log is for people watching a run; nothing in the
//! orchestrator reads it back to make decisions.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of entries retained (oldest are dropped first).
pub const LOG_CAPACITY: usize = 200;

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    #[default]
    Info,
    Ok,
    Error,
}

crate::simple_display! {
    LogKind {
        Info => "info",
        Ok => "ok",
        Error => "error",
    }
}

/// A timestamped line in the activity log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub at_ms: u64,
    pub text: String,
    #[serde(default)]
    pub kind: LogKind,
}

impl LogEntry {
    pub fn new(at_ms: u64, text: impl Into<String>, kind: LogKind) -> Self {
        Self { at_ms, text: text.into(), kind }
    }

    /// `HH:MM:SS` in local time
    pub fn time_label(&self) -> String {
        match Local.timestamp_millis_opt(self.at_ms as i64).single() {
            Some(at) => at.format("%H:%M:%S").to_string(),
            None => "--:--:--".to_string(),
        }
    }

    /// `[HH:MM:SS] text`
    pub fn render(&self) -> String {
        format!("[{}] {}", self.time_label(), self.text)
    }
}

/// Append-only ring buffer of log entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LogEntry>", into = "Vec<LogEntry>")]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity.min(LOG_CAPACITY)), capacity }
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// The most recent `n` entries, oldest first.
    pub fn tail(&self, n: usize) -> Vec<LogEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).cloned().collect()
    }

    /// Count of entries of one kind.
    pub fn count(&self, kind: LogKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}

/// Durable home for the activity log.
///
/// Called with the whole buffer after every append; implementations log
/// their own failures rather than interrupting a run.
pub trait LogSink: Send + Sync {
    fn persist(&self, buffer: &LogBuffer);
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<LogEntry>> for LogBuffer {
    fn from(entries: Vec<LogEntry>) -> Self {
        let mut buffer = LogBuffer::new();
        for entry in entries {
            buffer.push(entry);
        }
        buffer
    }
}

impl From<LogBuffer> for Vec<LogEntry> {
    fn from(buffer: LogBuffer) -> Self {
        buffer.entries.into()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
