// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! DOM capability used by page steps.
//!
//! Every primitive addresses elements by CSS selector and reports whether
//! the element was there; deciding what a missing element means is left
//! to the step.

use crate::queue::FileBytes;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("element not found: {0}")]
    NotFound(String),
    #[error("script error: {0}")]
    Script(String),
    #[error("page closed")]
    Closed,
}

/// Outcome of filling a tag widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFill {
    Added(usize),
    MissingContainer,
    MissingInput,
}

#[async_trait]
pub trait Dom: Send + Sync {
    /// Whether the document finished loading.
    async fn ready(&self) -> Result<bool, DomError>;

    async fn exists(&self, selector: &str) -> Result<bool, DomError>;

    /// Click the first match. Returns false when nothing matched.
    async fn click(&self, selector: &str) -> Result<bool, DomError>;

    /// Click the first match whose trimmed text equals `text`.
    async fn click_text(&self, selector: &str, text: &str) -> Result<bool, DomError>;

    /// Click every match. Returns how many were clicked.
    async fn click_all(&self, selector: &str) -> Result<usize, DomError>;

    /// Checked state of every matching checkbox, in document order.
    async fn checkbox_states(&self, selector: &str) -> Result<Vec<bool>, DomError>;

    /// Click the `index`-th match. Returns false when there is no such match.
    async fn toggle_nth(&self, selector: &str, index: usize) -> Result<bool, DomError>;

    /// Computed `display` of the first match.
    async fn display_of(&self, selector: &str) -> Result<Option<String>, DomError>;

    /// Set a form field's value the way typing would, firing `input` and `change`.
    async fn set_value(&self, selector: &str, value: &str) -> Result<bool, DomError>;

    /// Click the element with `id` unless it is already checked.
    async fn set_checked_by_id(&self, id: &str) -> Result<bool, DomError>;

    /// Put `file` into a file input and fire `change`.
    async fn attach_file(&self, selector: &str, file: &FileBytes) -> Result<bool, DomError>;

    /// Type each tag into the tag input inside `container`, confirming with Enter.
    async fn add_tags(
        &self,
        container: &str,
        input: &str,
        tags: &[String],
    ) -> Result<TagFill, DomError>;
}
