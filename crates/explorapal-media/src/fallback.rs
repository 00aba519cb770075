// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic placeholder results.
//!
//! Pure functions of the request and configured defaults: no I/O, no
//! clock, no randomness, and no failure path.

use explorapal_core::text::truncate_chars;
use explorapal_core::{GenerationMode, GenerationResult, Metadata};

use crate::normalize::DESCRIPTION_EXCERPT_CHARS;
use crate::request::ValidatedRequest;

/// Smallest placeholder artifact, in bytes.
pub const MIN_ARTIFACT_LEN: usize = 1024;

pub const FALLBACK_TITLE: &str = "Placeholder video";

const DEFAULT_SCENES: [&str; 2] = ["Scene 1", "Scene 2"];

/// Placeholder for a validated request.
pub fn synthesize(request: &ValidatedRequest, default_resolution: &str) -> GenerationResult {
    let scenes = if request.scenes.is_empty() {
        DEFAULT_SCENES.iter().map(|s| s.to_string()).collect()
    } else {
        request.scenes.clone()
    };

    let excerpt = truncate_chars(&request.subject, DESCRIPTION_EXCERPT_CHARS);
    let metadata = Metadata {
        title: FALLBACK_TITLE.to_string(),
        description: format!(
            "The video service is temporarily unavailable, so this placeholder stands in for: {excerpt}"
        ),
        scenes,
        language: request.language.clone(),
        resolution: default_resolution.to_string(),
    };

    GenerationResult {
        artifact: placeholder_mp4(&summary(request, &metadata.scenes)),
        format: "mp4".to_string(),
        duration_secs: request.duration_secs,
        metadata,
    }
}

fn summary(request: &ValidatedRequest, scenes: &[String]) -> String {
    let mode = match request.mode {
        GenerationMode::TextToMedia => "text_to_media",
        GenerationMode::MediaToMedia => "media_to_media",
    };
    format!(
        "explorapal placeholder video\nmode: {mode}\nsubject: {}\nstyle: {}\nduration: {:.0}s\nlanguage: {}\nscenes: {}\n",
        truncate_chars(&request.subject, 200),
        request.style,
        request.duration_secs,
        request.language,
        scenes.join(" | "),
    )
}

/// An ISO-BMFF stream: `ftyp` (isom), `mdat` carrying `payload`, then a
/// `free` box padding the total to at least [`MIN_ARTIFACT_LEN`].
pub fn placeholder_mp4(payload: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(MIN_ARTIFACT_LEN.max(payload.len() + 64));

    let mut ftyp = Vec::with_capacity(20);
    ftyp.extend_from_slice(b"isom");
    ftyp.extend_from_slice(&512u32.to_be_bytes());
    for brand in [b"isom", b"iso2", b"mp41"] {
        ftyp.extend_from_slice(brand);
    }
    push_box(&mut out, b"ftyp", &ftyp);
    push_box(&mut out, b"mdat", payload.as_bytes());

    if out.len() < MIN_ARTIFACT_LEN {
        let padding = (MIN_ARTIFACT_LEN - out.len()).saturating_sub(8);
        push_box(&mut out, b"free", &vec![0u8; padding]);
    }
    out
}

fn push_box(out: &mut Vec<u8>, kind: &[u8; 4], body: &[u8]) {
    let size = u32::try_from(body.len() + 8).unwrap_or(u32::MAX);
    out.extend_from_slice(&size.to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(body);
}
