// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The two operator settings: store link and source path.

use crate::file::{read_json, remove, write_json};
use crate::StorageError;
use pubrun_core::strip_quotes;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub store_url: String,
    #[serde(default)]
    pub source_path: String,
}

impl Settings {
    /// Build from operator input, dropping pasted enclosing quotes.
    pub fn new(store_url: &str, source_path: &str) -> Self {
        Self { store_url: strip_quotes(store_url), source_path: strip_quotes(source_path) }
    }

    /// Both values present.
    pub fn is_complete(&self) -> bool {
        !self.store_url.is_empty() && !self.source_path.is_empty()
    }

    /// Overlay explicitly supplied values on saved ones.
    pub fn merged(&self, store_url: Option<&str>, source_path: Option<&str>) -> Self {
        Self::new(
            store_url.unwrap_or(&self.store_url),
            source_path.unwrap_or(&self.source_path),
        )
    }
}

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(state_dir: &Path) -> Self {
        Self { path: state_dir.join(SETTINGS_FILE) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved settings, or empty ones if nothing was saved.
    pub fn load(&self) -> Result<Settings, StorageError> {
        let settings: Option<Settings> = read_json(&self.path)?;
        Ok(settings.map(|s| Settings::new(&s.store_url, &s.source_path)).unwrap_or_default())
    }

    pub fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        let cleaned = Settings::new(&settings.store_url, &settings.source_path);
        write_json(&self.path, &cleaned)?;
        tracing::debug!(path = %self.path.display(), "saved settings");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        remove(&self.path)?;
        tracing::debug!(path = %self.path.display(), "cleared settings");
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
