// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synchronous AI operations for Explorapal.
//!
//! [`Assistant`] covers the single-request flows (image and video analysis,
//! guiding questions, note polishing, research reports, speech in both
//! directions) over any
//! [`ChatProvider`](explorapal_core::ChatProvider). [`ChatClient`] is the
//! HTTP implementation for OpenAI-compatible endpoints.

pub mod assistant;
pub mod client;
pub mod decode;
pub mod fallback;
pub mod types;

pub use assistant::Assistant;
pub use client::ChatClient;
pub use decode::{DecodeStrategy, Decoded, decode_reply};
pub use types::{
    AnalysisSummary, AudioAnalysis, BoundingBox, EmotionAnalysis, Finding, ImageDescription,
    ObjectDetection, PolishedNote, Question, Reference, ResearchReport, SceneAnalysis, Speech,
    SpeechRequest, TextRecognition, Transcription, TranscriptionRequest, VideoAnalysis,
    VideoAnalysisRequest,
};
