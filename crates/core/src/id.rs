// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Opaque handles

crate::define_id! {
    /// Handle of the controlled page (a browser target id).
    ///
    /// Created once by the page adapter and reused across runs; the
    /// orchestrator only compares and forwards it.
    pub struct PageId;
}

/// Returns a string slice truncated to at most `n` characters.
pub fn short(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
