// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retained activity log entries.

use crate::file::{read_json, remove, write_json};
use crate::StorageError;
use pubrun_core::{LogBuffer, LogSink};
use std::fs;
use std::path::{Path, PathBuf};

const LOG_FILE: &str = "logs.json";

pub struct LogStore {
    path: PathBuf,
}

impl LogStore {
    pub fn new(state_dir: &Path) -> Self {
        Self { path: state_dir.join(LOG_FILE) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Retained entries, oldest first.
    ///
    /// A file that no longer parses is moved to `logs.bak` and an empty
    /// buffer is returned.
    pub fn load(&self) -> Result<LogBuffer, StorageError> {
        match read_json::<LogBuffer>(&self.path) {
            Ok(buffer) => Ok(buffer.unwrap_or_default()),
            Err(StorageError::Json { source, .. }) => {
                let bak = self.path.with_extension("bak");
                tracing::warn!(
                    path = %self.path.display(),
                    bak = %bak.display(),
                    error = %source,
                    "log file is corrupt, moving it aside"
                );
                fs::rename(&self.path, &bak)
                    .map_err(|e| StorageError::Io { path: bak.clone(), source: e })?;
                Ok(LogBuffer::new())
            }
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, buffer: &LogBuffer) -> Result<(), StorageError> {
        write_json(&self.path, buffer)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        remove(&self.path)
    }
}

impl LogSink for LogStore {
    fn persist(&self, buffer: &LogBuffer) {
        if let Err(e) = self.save(buffer) {
            tracing::warn!(error = %e, "failed to persist activity log");
        }
    }
}

#[cfg(test)]
#[path = "log_store_tests.rs"]
mod tests;
