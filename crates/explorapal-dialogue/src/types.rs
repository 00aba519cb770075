// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Result types of the assistant operations.
//!
//! Every field has a serde default: models routinely omit fields, and a
//! partially filled answer is still worth keeping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the image-analysis model recognized in a picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDescription {
    #[serde(default)]
    pub object_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub key_features: Vec<String>,
    #[serde(default)]
    pub scientific_name: String,
}

fn default_confidence() -> f64 {
    0.95
}

/// A guiding question for the child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub content: String,
    /// observation, reasoning, experiment or comparison.
    #[serde(default, rename = "type", alias = "question_type")]
    pub question_type: String,
    /// basic, intermediate or advanced.
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub purpose: String,
}

/// A child's note after rewriting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolishedNote {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub scientific_concepts: Vec<String>,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub connections: Vec<String>,
    #[serde(default)]
    pub formatted_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub evidence: Vec<String>,
    #[serde(default)]
    pub significance: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub credit: String,
}

/// A research report assembled from a project's records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchReport {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub r#abstract: String,
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub methodology: String,
    #[serde(default)]
    pub findings: Vec<Finding>,
    #[serde(default)]
    pub discussion: String,
    #[serde(default)]
    pub conclusion: String,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub child_insights: String,
    #[serde(default)]
    pub next_steps: Vec<String>,
    /// Full report text.
    #[serde(default)]
    pub content: String,
}

/// Synthesized speech.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speech {
    pub audio: Vec<u8>,
    pub format: String,
}

impl fmt::Debug for Speech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Speech")
            .field("audio_len", &self.audio.len())
            .field("format", &self.format)
            .finish()
    }
}

/// Parameters for [`Assistant::synthesize_speech`](crate::Assistant::synthesize_speech).
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: Option<String>,
    pub language: Option<String>,
    /// Playback rate multiplier; non-positive values mean normal speed.
    pub speed: f32,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
            language: None,
            speed: 1.0,
        }
    }
}

/// Parameters for [`Assistant::speech_to_text`](crate::Assistant::speech_to_text).
#[derive(Clone, PartialEq)]
pub struct TranscriptionRequest {
    pub audio: Vec<u8>,
    /// Container format such as `wav` or `mp3`; blank means `wav`.
    pub format: Option<String>,
    /// Spoken language; blank means the configured default.
    pub language: Option<String>,
}

impl TranscriptionRequest {
    pub fn new(audio: impl Into<Vec<u8>>) -> Self {
        Self {
            audio: audio.into(),
            format: None,
            language: None,
        }
    }
}

impl fmt::Debug for TranscriptionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranscriptionRequest")
            .field("audio_len", &self.audio.len())
            .field("format", &self.format)
            .field("language", &self.language)
            .finish()
    }
}

/// Text recognized in an audio clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    #[serde(default, alias = "transcription")]
    pub text: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub language: String,
}

impl Transcription {
    /// A transcription the model gave as plain text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: default_confidence(),
            language: String::new(),
        }
    }
}

/// Parameters for [`Assistant::analyze_video`](crate::Assistant::analyze_video).
#[derive(Clone, PartialEq)]
pub struct VideoAnalysisRequest {
    pub video: Vec<u8>,
    /// Container format; blank means `mp4`.
    pub format: Option<String>,
    /// Focus of the analysis; blank means `comprehensive`.
    pub analysis_type: Option<String>,
    /// Clip length in seconds, if known.
    pub duration_secs: Option<f64>,
}

impl VideoAnalysisRequest {
    pub fn new(video: impl Into<Vec<u8>>) -> Self {
        Self {
            video: video.into(),
            format: None,
            analysis_type: None,
            duration_secs: None,
        }
    }
}

impl fmt::Debug for VideoAnalysisRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoAnalysisRequest")
            .field("video_len", &self.video.len())
            .field("format", &self.format)
            .field("analysis_type", &self.analysis_type)
            .field("duration_secs", &self.duration_secs)
            .finish()
    }
}

/// Pixel rectangle in a video frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneAnalysis {
    #[serde(default)]
    pub timestamp: f64,
    #[serde(default)]
    pub scene_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectDetection {
    #[serde(default)]
    pub timestamp: f64,
    #[serde(default)]
    pub object_name: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub bbox: BoundingBox,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionAnalysis {
    #[serde(default)]
    pub timestamp: f64,
    #[serde(default)]
    pub emotion: String,
    #[serde(default)]
    pub confidence: f64,
}

/// On-screen text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRecognition {
    #[serde(default)]
    pub timestamp: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub bbox: BoundingBox,
}

/// Speech heard in the soundtrack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioAnalysis {
    #[serde(default)]
    pub timestamp: f64,
    #[serde(default)]
    pub transcription: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub category: String,
    /// Clip length in seconds.
    #[serde(default)]
    pub duration: f64,
}

/// Timeline of what a video shows and says.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoAnalysis {
    #[serde(default)]
    pub scenes: Vec<SceneAnalysis>,
    #[serde(default)]
    pub objects: Vec<ObjectDetection>,
    #[serde(default)]
    pub emotions: Vec<EmotionAnalysis>,
    #[serde(default)]
    pub texts: Vec<TextRecognition>,
    #[serde(default)]
    pub audio: Vec<AudioAnalysis>,
    #[serde(default)]
    pub summary: AnalysisSummary,
}

impl VideoAnalysis {
    /// True when the model reported nothing at all.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
            && self.objects.is_empty()
            && self.emotions.is_empty()
            && self.texts.is_empty()
            && self.audio.is_empty()
            && self.summary.title.trim().is_empty()
            && self.summary.description.trim().is_empty()
    }
}
