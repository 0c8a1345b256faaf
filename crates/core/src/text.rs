// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Normalisation of operator-supplied strings.
//!
//! Paths copied from a file manager usually arrive wrapped in quotes
//! (`"C:\designs\cat.png"`); both settings values and row image paths go
//! through the same cleanup.

/// Trim, drop one pair of matching enclosing quotes, trim again.
pub fn strip_quotes(s: &str) -> String {
    let trimmed = s.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| {
            let inner = trimmed.strip_prefix(*q)?.strip_suffix(*q)?;
            Some(inner)
        })
        .unwrap_or(trimmed);
    unquoted.trim().to_string()
}

/// Clean a row's image path before asking the queue server for it.
pub fn clean_path(path: &str) -> String {
    strip_quotes(path)
}

/// Last segment of a Windows or POSIX path.
pub fn file_name(path: &str) -> Option<&str> {
    path.rsplit(['\\', '/']).next().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
