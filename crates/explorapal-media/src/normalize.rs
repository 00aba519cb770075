// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps a finished job onto [`GenerationResult`], filling whatever the
//! provider left blank.

use explorapal_core::text::{non_blank, truncate_chars};
use explorapal_core::{GenerationMode, GenerationResult, Metadata, StatusReport};

use crate::request::ValidatedRequest;

/// Characters of the script or prompt kept in a derived description.
pub const DESCRIPTION_EXCERPT_CHARS: usize = 100;

/// Format assumed when neither the provider nor the bytes say otherwise.
pub const DEFAULT_FORMAT: &str = "mp4";

/// Provider hints win; blanks fall back to values derived from the request.
pub fn normalize(
    request: &ValidatedRequest,
    report: &StatusReport,
    artifact: Vec<u8>,
    default_resolution: &str,
) -> GenerationResult {
    let hints = &report.hints;

    let format = non_blank(hints.format.as_deref())
        .map(|f| f.trim_start_matches('.').to_ascii_lowercase())
        .or_else(|| sniff_format(&artifact))
        .unwrap_or_else(|| DEFAULT_FORMAT.to_string());

    let duration_secs = hints
        .duration_secs
        .filter(|d| d.is_finite() && *d > 0.0)
        .unwrap_or(request.duration_secs);

    let scenes: Vec<String> = hints
        .scenes
        .iter()
        .filter_map(|s| non_blank(Some(s)).map(str::to_string))
        .collect();

    let metadata = Metadata {
        title: non_blank(hints.title.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| default_title(request.mode).to_string()),
        description: non_blank(hints.description.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| default_description(request)),
        scenes: if scenes.is_empty() {
            request.scenes.clone()
        } else {
            scenes
        },
        language: non_blank(hints.language.as_deref())
            .unwrap_or(&request.language)
            .to_string(),
        resolution: non_blank(hints.resolution.as_deref())
            .unwrap_or(default_resolution)
            .to_string(),
    };

    GenerationResult {
        artifact,
        format,
        duration_secs,
        metadata,
    }
}

/// Container format from the artifact's magic bytes, if recognizable.
pub fn sniff_format(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|kind| kind.extension().to_string())
}

fn default_title(mode: GenerationMode) -> &'static str {
    match mode {
        GenerationMode::TextToMedia => "AI-generated learning video",
        GenerationMode::MediaToMedia => "AI video from your picture",
    }
}

fn default_description(request: &ValidatedRequest) -> String {
    let excerpt = truncate_chars(&request.subject, DESCRIPTION_EXCERPT_CHARS);
    match request.mode {
        GenerationMode::TextToMedia => format!("Video generated from the script: {excerpt}"),
        GenerationMode::MediaToMedia => {
            format!("Video generated from your picture and description: {excerpt}")
        }
    }
}
