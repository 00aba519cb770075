// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the media pipeline, the assistant, and their callers.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// --- Generation request ---

/// Which inputs drive a media generation job.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GenerationMode {
    /// A free-text script describes the whole video.
    TextToMedia,
    /// A source image plus a seed prompt.
    MediaToMedia,
}

/// Source media attached to an image-conditioned request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMedia {
    /// MIME type, e.g. `image/jpeg`.
    pub mime_type: String,
    /// Raw media bytes.
    pub data: Vec<u8>,
}

impl fmt::Debug for SourceMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceMedia")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Caller-supplied parameters for a media generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub mode: GenerationMode,
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub source_media: Option<SourceMedia>,
    #[serde(default)]
    pub duration_secs: Option<f64>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub scenes: Vec<String>,
}

impl GenerationRequest {
    /// A script-driven request with every optional field unset.
    pub fn from_script(script: impl Into<String>) -> Self {
        Self {
            mode: GenerationMode::TextToMedia,
            script: Some(script.into()),
            prompt: None,
            source_media: None,
            duration_secs: None,
            style: None,
            voice: None,
            language: None,
            scenes: Vec::new(),
        }
    }

    /// An image-conditioned request with every optional field unset.
    pub fn from_media(prompt: impl Into<String>, media: SourceMedia) -> Self {
        Self {
            mode: GenerationMode::MediaToMedia,
            script: None,
            prompt: Some(prompt.into()),
            source_media: Some(media),
            duration_secs: None,
            style: None,
            voice: None,
            language: None,
            scenes: Vec::new(),
        }
    }

    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    pub fn with_scenes<I, S>(mut self, scenes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scenes = scenes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

// --- Job tracking ---

/// Opaque identifier the provider assigns to a submitted job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobHandle(pub String);

impl JobHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider-owned lifecycle state of a job.
///
/// Transitions are monotonic: once `Completed` or `Failed` is observed the
/// job never moves again.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Maps the async gateway's numeric status codes.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Queued),
            2 => Some(Self::Running),
            3 => Some(Self::Completed),
            4 => Some(Self::Failed),
            _ => None,
        }
    }

    /// Maps a status name, accepting the spellings providers commonly use.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "queued" | "pending" | "submitted" => Some(Self::Queued),
            "running" | "processing" | "in_progress" => Some(Self::Running),
            "completed" | "succeeded" | "success" | "done" => Some(Self::Completed),
            "failed" | "failure" | "error" | "cancelled" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Optional metadata a provider may attach to a finished job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderHints {
    pub title: Option<String>,
    pub description: Option<String>,
    pub scenes: Vec<String>,
    pub language: Option<String>,
    pub resolution: Option<String>,
    pub duration_secs: Option<f64>,
    pub format: Option<String>,
}

/// One observation of a job's state.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub status: JobStatus,
    pub artifact_url: Option<String>,
    pub failure_message: Option<String>,
    pub hints: ProviderHints,
}

impl StatusReport {
    /// A bare report with no URL, message, or hints.
    pub fn new(status: JobStatus) -> Self {
        Self {
            status,
            artifact_url: None,
            failure_message: None,
            hints: ProviderHints::default(),
        }
    }
}

/// Provider-ready description of a job to submit.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSpec {
    pub model: String,
    pub prompt: String,
    pub duration_secs: f64,
    /// `data:<mime>;base64,<payload>` reference for image-conditioned jobs.
    pub image_data_url: Option<String>,
}

// --- Results ---

/// Descriptive metadata accompanying a generated artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub scenes: Vec<String>,
    pub language: String,
    pub resolution: String,
}

/// A generated artifact with its format, length, and metadata.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub artifact: Vec<u8>,
    pub format: String,
    pub duration_secs: f64,
    pub metadata: Metadata,
}

impl fmt::Debug for GenerationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationResult")
            .field("artifact_len", &self.artifact.len())
            .field("format", &self.format)
            .field("duration_secs", &self.duration_secs)
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// Response envelope carrying a value and whether it is a placeholder.
///
/// `degraded` is set exactly when `value` came from a fallback path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome<T> {
    pub value: T,
    pub degraded: bool,
    pub message: String,
}

impl<T> Outcome<T> {
    /// A value produced by the real provider pipeline.
    pub fn genuine(value: T, message: impl Into<String>) -> Self {
        Self {
            value,
            degraded: false,
            message: message.into(),
        }
    }

    /// A placeholder value substituted after `cause` prevented the real one.
    pub fn fallback(value: T, cause: &crate::ExploraError) -> Self {
        Self {
            value,
            degraded: true,
            message: format!("placeholder result ({}: {cause})", cause.stage()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            degraded: self.degraded,
            message: self.message,
        }
    }
}

// --- Chat (synchronous flow) ---

/// A piece of user-visible content in a chat message.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text(String),
    ImageUrl(String),
    /// A video reference, usually a `data:` URL.
    VideoUrl(String),
    /// Base64 audio with its container format.
    InputAudio { data: String, format: String },
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub parts: Vec<ContentPart>,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            parts: vec![ContentPart::Text(text.into())],
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            parts: vec![ContentPart::Text(text.into())],
        }
    }
}

/// A single-round-trip completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

// --- Credentials ---

/// Application identity used to authenticate every provider call.
#[derive(Clone)]
pub struct AppCredentials {
    app_id: String,
    app_key: SecretString,
}

impl AppCredentials {
    pub fn new(app_id: impl Into<String>, app_key: SecretString) -> Self {
        Self {
            app_id: app_id.into(),
            app_key,
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// `<app_id>:<app_key>`, the token form the provider expects.
    pub fn token(&self) -> String {
        format!("{}:{}", self.app_id, self.app_key.expose_secret())
    }

    /// `Bearer <app_id>:<app_key>`.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token())
    }
}

impl fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCredentials")
            .field("app_id", &self.app_id)
            .field("app_key", &"[REDACTED]")
            .finish()
    }
}
