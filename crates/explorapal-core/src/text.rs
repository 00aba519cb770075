// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text repair for provider output.
//!
//! Provider bodies are only mostly UTF-8. Everything user-facing passes
//! through [`sanitize_utf8`] before it is decoded, so a corrupted byte
//! sequence can never reach a client: each maximal invalid sequence becomes
//! one visible [`REPLACEMENT_MARKER`].

use std::borrow::Cow;

/// Marker substituted for every invalid byte sequence.
pub const REPLACEMENT_MARKER: char = char::REPLACEMENT_CHARACTER;

/// Returns `bytes` as text, replacing invalid UTF-8 with [`REPLACEMENT_MARKER`].
///
/// Borrows when the input is already valid, so sanitizing clean text is free.
pub fn sanitize_utf8(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Counts the replacement markers in `text`.
pub fn replacement_count(text: &str) -> usize {
    text.chars().filter(|&c| c == REPLACEMENT_MARKER).count()
}

/// Truncates `text` to at most `max_chars` characters, never splitting one.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Like [`truncate_chars`] but appends `...` when anything was cut.
pub fn ellipsize(text: &str, max_chars: usize) -> String {
    let cut = truncate_chars(text, max_chars);
    if cut.len() < text.len() {
        format!("{cut}...")
    } else {
        cut.to_string()
    }
}

/// Returns `value` trimmed, or `None` when it is missing or blank.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
