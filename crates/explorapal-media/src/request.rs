// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request validation and provider payload construction.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use explorapal_config::MediaConfig;
use explorapal_core::text::non_blank;
use explorapal_core::{GenerationMode, GenerationRequest, JobSpec, SourceMedia, ValidationError};

/// A request that passed validation, with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub mode: GenerationMode,
    /// Script (text mode) or seed prompt (media mode).
    pub subject: String,
    pub source_media: Option<SourceMedia>,
    pub duration_secs: f64,
    pub style: String,
    pub voice: String,
    pub language: String,
    pub scenes: Vec<String>,
}

/// Checks mode exclusivity and duration bounds, then fills defaults.
///
/// Exactly one of `script` or `prompt` + `source_media` must be present and
/// the declared mode must agree with it.
pub fn validate(
    request: &GenerationRequest,
    defaults: &MediaConfig,
) -> Result<ValidatedRequest, ValidationError> {
    let script = non_blank(request.script.as_deref());
    let prompt = non_blank(request.prompt.as_deref());
    let media = request.source_media.as_ref();
    let has_media_input = prompt.is_some() || media.is_some();

    let (inferred, subject) = match (script, has_media_input) {
        (Some(_), true) => return Err(ValidationError::ModeConflict),
        (None, false) => return Err(ValidationError::ModeMissing),
        (Some(script), false) => (GenerationMode::TextToMedia, script),
        (None, true) => {
            let prompt = prompt.ok_or(ValidationError::EmptyField("prompt"))?;
            match media {
                Some(m) if !m.data.is_empty() => {}
                _ => return Err(ValidationError::EmptyField("source_media")),
            }
            (GenerationMode::MediaToMedia, prompt)
        }
    };

    if inferred != request.mode {
        return Err(ValidationError::ModeMismatch {
            declared: request.mode.to_string(),
            inferred: inferred.to_string(),
        });
    }

    let duration_secs = match request.duration_secs {
        None => f64::from(defaults.default_duration_secs),
        Some(secs) if secs.is_finite() && secs > 0.0 && secs <= f64::from(defaults.max_duration_secs) => {
            secs
        }
        Some(secs) => {
            return Err(ValidationError::DurationOutOfRange {
                requested: secs.to_string(),
                max: defaults.max_duration_secs,
            });
        }
    };

    let or_default = |value: &Option<String>, default: &str| {
        non_blank(value.as_deref()).unwrap_or(default).to_string()
    };

    Ok(ValidatedRequest {
        mode: inferred,
        subject: subject.to_string(),
        source_media: request.source_media.clone(),
        duration_secs,
        style: or_default(&request.style, &defaults.default_style),
        voice: or_default(&request.voice, &defaults.default_voice),
        language: or_default(&request.language, &defaults.default_language),
        scenes: request
            .scenes
            .iter()
            .filter_map(|s| non_blank(Some(s)).map(str::to_string))
            .collect(),
    })
}

impl ValidatedRequest {
    /// Builds the provider-ready job description for `model`.
    pub fn job_spec(&self, model: &str) -> JobSpec {
        let (prompt, image_data_url) = match (&self.mode, &self.source_media) {
            (GenerationMode::MediaToMedia, Some(media)) => {
                (self.media_prompt(), Some(data_url(media)))
            }
            _ => (self.video_brief(), None),
        };
        JobSpec {
            model: model.to_string(),
            prompt,
            duration_secs: self.duration_secs,
            image_data_url,
        }
    }

    /// Descriptive brief for script-driven jobs.
    fn video_brief(&self) -> String {
        format!(
            "Create a vivid educational video from the script and requirements below.\n\n\
             Script: {}\n\
             Style: {}\n\
             Target duration: {:.0} seconds\n\
             Scenes: {}\n\
             Narration voice: {}\n\
             Language: {}\n\n\
             Describe the main setting and background, character actions and \
             expressions, color and lighting, composition and camera angle, and \
             the motion that carries each scene.",
            self.subject,
            self.style,
            self.duration_secs,
            self.scenes_line(),
            self.voice,
            self.language,
        )
    }

    /// Seed prompt plus style hints for image-conditioned jobs.
    fn media_prompt(&self) -> String {
        if self.scenes.is_empty() {
            format!("{} (style: {})", self.subject, self.style)
        } else {
            format!(
                "{} (style: {}; scenes: {})",
                self.subject,
                self.style,
                self.scenes_line()
            )
        }
    }

    fn scenes_line(&self) -> String {
        if self.scenes.is_empty() {
            "unspecified".to_string()
        } else {
            self.scenes.join(", ")
        }
    }
}

/// `data:<mime>;base64,<payload>` reference for inline media.
pub fn data_url(media: &SourceMedia) -> String {
    let mime = non_blank(Some(&media.mime_type)).unwrap_or("image/jpeg");
    format!("data:{mime};base64,{}", STANDARD.encode(&media.data))
}
