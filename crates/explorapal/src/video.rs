// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `explorapal video` command implementation.
//!
//! Builds a [`GenerationRequest`] from the flags, runs it through the media
//! generator and writes the artifact to disk. Ctrl+C and `--timeout` both
//! cancel the running job; the command still writes the placeholder.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use explorapal_config::ExplorapalConfig;
use explorapal_core::{
    ExploraError, GenerationMode, GenerationRequest, GenerationResult, Outcome, SourceMedia,
};
use explorapal_media::MediaGenerator;
use serde::Serialize;
use tracing::debug;

use crate::shutdown;

const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

#[derive(Args, Debug, Default)]
pub struct VideoArgs {
    /// Script describing the whole video.
    #[arg(long)]
    pub script: Option<String>,

    /// Seed prompt for a picture-based video (needs --image).
    #[arg(long)]
    pub prompt: Option<String>,

    /// Picture to animate.
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Target length in seconds.
    #[arg(long)]
    pub duration: Option<f64>,

    /// Scene description; repeat for several scenes.
    #[arg(long = "scene")]
    pub scenes: Vec<String>,

    #[arg(long)]
    pub style: Option<String>,

    #[arg(long)]
    pub voice: Option<String>,

    #[arg(long)]
    pub language: Option<String>,

    /// Cancel after this many seconds and keep the placeholder.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Where to write the video. Defaults to `explorapal-video.<format>`.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the result summary as JSON.
    #[arg(long)]
    pub json: bool,

    /// Disable colors.
    #[arg(long)]
    pub plain: bool,
}

/// What the command reports about a finished generation.
#[derive(Debug, Serialize)]
pub struct VideoSummary {
    pub degraded: bool,
    pub message: String,
    pub output: PathBuf,
    pub format: String,
    pub bytes: usize,
    pub duration_secs: f64,
    pub title: String,
    pub description: String,
    pub scenes: Vec<String>,
    pub language: String,
    pub resolution: String,
}

impl VideoSummary {
    fn new(outcome: &Outcome<GenerationResult>, output: &Path) -> Self {
        let result = &outcome.value;
        Self {
            degraded: outcome.degraded,
            message: outcome.message.clone(),
            output: output.to_path_buf(),
            format: result.format.clone(),
            bytes: result.artifact.len(),
            duration_secs: result.duration_secs,
            title: result.metadata.title.clone(),
            description: result.metadata.description.clone(),
            scenes: result.metadata.scenes.clone(),
            language: result.metadata.language.clone(),
            resolution: result.metadata.resolution.clone(),
        }
    }
}

pub async fn run_video(config: &ExplorapalConfig, args: VideoArgs) -> Result<(), ExploraError> {
    let generator = MediaGenerator::from_config(config)?;

    let media = match &args.image {
        Some(path) => Some(read_source_media(path).await?),
        None => None,
    };
    let request = build_request(&args, media);

    let cancel = shutdown::install_signal_handler();
    if let Some(secs) = args.timeout {
        shutdown::cancel_after(&cancel, Duration::from_secs(secs));
    }

    let outcome = generator.generate(&request, &cancel).await?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&outcome.value.format));
    tokio::fs::write(&output, &outcome.value.artifact)
        .await
        .map_err(|e| ExploraError::Internal(format!("cannot write {}: {e}", output.display())))?;
    debug!(path = %output.display(), bytes = outcome.value.artifact.len(), "video written");

    let summary = VideoSummary::new(&outcome, &output);
    if args.json {
        let text = serde_json::to_string_pretty(&summary)
            .map_err(|e| ExploraError::Internal(format!("failed to serialize summary: {e}")))?;
        println!("{text}");
    } else {
        let use_color = !args.plain && std::io::stdout().is_terminal();
        print_summary(&summary, use_color);
    }
    Ok(())
}

/// Maps flags onto a request. The mode follows the script flag; mismatched
/// combinations are left for request validation to reject.
pub fn build_request(args: &VideoArgs, media: Option<SourceMedia>) -> GenerationRequest {
    let mode = if args.script.is_some() {
        GenerationMode::TextToMedia
    } else {
        GenerationMode::MediaToMedia
    };
    GenerationRequest {
        mode,
        script: args.script.clone(),
        prompt: args.prompt.clone(),
        source_media: media,
        duration_secs: args.duration,
        style: args.style.clone(),
        voice: args.voice.clone(),
        language: args.language.clone(),
        scenes: args.scenes.clone(),
    }
}

async fn read_source_media(path: &Path) -> Result<SourceMedia, ExploraError> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| ExploraError::Internal(format!("cannot read {}: {e}", path.display())))?;
    Ok(SourceMedia {
        mime_type: sniff_mime(&data).to_string(),
        data,
    })
}

fn sniff_mime(data: &[u8]) -> &'static str {
    infer::get(data)
        .map(|kind| kind.mime_type())
        .filter(|mime| mime.starts_with("image/"))
        .unwrap_or(FALLBACK_IMAGE_MIME)
}

fn default_output_path(format: &str) -> PathBuf {
    PathBuf::from(format!("explorapal-video.{format}"))
}

fn print_summary(summary: &VideoSummary, use_color: bool) {
    println!();
    println!("  explorapal video");
    println!("  {}", "-".repeat(35));

    if use_color {
        use colored::Colorize;
        if summary.degraded {
            println!("    Result:   {} {}", "!".yellow(), summary.message.yellow());
        } else {
            println!("    Result:   {} {}", "✓".green(), summary.message.green());
        }
    } else if summary.degraded {
        println!("    Result:   [PLACEHOLDER] {}", summary.message);
    } else {
        println!("    Result:   [OK] {}", summary.message);
    }

    println!("    Title:    {}", summary.title);
    println!(
        "    Video:    {} ({} bytes, {}, {:.0}s, {})",
        summary.output.display(),
        summary.bytes,
        summary.format,
        summary.duration_secs,
        summary.resolution
    );
    if !summary.scenes.is_empty() {
        println!("    Scenes:   {}", summary.scenes.join(" | "));
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_flag_selects_text_mode() {
        let args = VideoArgs {
            script: Some("How volcanoes erupt".into()),
            scenes: vec!["magma".into(), "ash".into()],
            duration: Some(45.0),
            ..VideoArgs::default()
        };
        let request = build_request(&args, None);
        assert_eq!(request.mode, GenerationMode::TextToMedia);
        assert_eq!(request.scenes, ["magma", "ash"]);
        assert_eq!(request.duration_secs, Some(45.0));
    }

    #[test]
    fn picture_flags_select_media_mode() {
        let args = VideoArgs {
            prompt: Some("make it roar".into()),
            ..VideoArgs::default()
        };
        let media = SourceMedia {
            mime_type: "image/png".into(),
            data: vec![1, 2, 3],
        };
        let request = build_request(&args, Some(media));
        assert_eq!(request.mode, GenerationMode::MediaToMedia);
        assert!(request.source_media.is_some());
    }

    #[test]
    fn mime_is_sniffed_from_bytes() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        assert_eq!(sniff_mime(&png), "image/png");
        assert_eq!(sniff_mime(b"not an image"), FALLBACK_IMAGE_MIME);
    }

    #[test]
    fn default_output_uses_format_extension() {
        assert_eq!(default_output_path("mp4"), PathBuf::from("explorapal-video.mp4"));
    }

    #[tokio::test]
    async fn source_media_is_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pic.bin");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10]).unwrap();
        let media = read_source_media(&path).await.unwrap();
        assert_eq!(media.mime_type, "image/jpeg");
        assert_eq!(media.data.len(), 6);

        let missing = read_source_media(&dir.path().join("nope.jpg")).await;
        assert!(missing.is_err());
    }
}
