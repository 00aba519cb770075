// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the asynchronous job gateway.

use explorapal_core::{ExploraError, JobStatus, ProviderHints, StatusReport, text::non_blank};
use serde::{Deserialize, Serialize};

// --- Submission ---

/// Body of `POST {async_base_url}/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitBody<'a> {
    pub model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_url: Option<&'a str>,
    pub prompt: &'a str,
    /// Whole seconds, sent as a string.
    pub duration: String,
}

/// Answer to a submission. Only `id` matters.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// --- Status ---

/// A status value as reported: either the gateway's integer code or a name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawStatus {
    Code(i64),
    Name(String),
}

impl RawStatus {
    pub fn resolve(&self) -> Result<JobStatus, ExploraError> {
        let status = match self {
            Self::Code(code) => JobStatus::from_code(*code),
            Self::Name(name) => JobStatus::from_name(name),
        };
        status.ok_or_else(|| ExploraError::UnknownStatus(self.to_string()))
    }
}

impl std::fmt::Display for RawStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Nested `response` object the gateway attaches once a job has settled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobResponse {
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

/// Body of `GET {async_base_url}/results/{id}`.
///
/// Gateways disagree on where the URL and message live, so both the flat
/// and the nested layouts are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusBody {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<RawStatus>,
    #[serde(default)]
    pub artifact_url: Option<String>,
    #[serde(default)]
    pub failure_message: Option<String>,
    #[serde(default)]
    pub response: Option<JobResponse>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub scenes: Option<Vec<String>>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub format: Option<String>,
}

impl StatusBody {
    /// Converts the wire shape into a [`StatusReport`].
    ///
    /// A missing status is a decode error; an unrecognized one is
    /// [`ExploraError::UnknownStatus`].
    pub fn into_report(self) -> Result<StatusReport, ExploraError> {
        let raw = self.status.ok_or_else(|| ExploraError::Decode {
            message: "status response has no `status` field".into(),
            source: None,
        })?;
        let status = raw.resolve()?;
        let nested = self.response.unwrap_or_default();

        let artifact_url = non_blank(self.artifact_url.as_deref())
            .or(non_blank(nested.video_url.as_deref()))
            .map(str::to_string);
        let failure_message = non_blank(self.failure_message.as_deref())
            .or(non_blank(nested.message.as_deref()))
            .map(str::to_string);

        Ok(StatusReport {
            status,
            artifact_url,
            failure_message,
            hints: ProviderHints {
                title: self.title,
                description: self.description,
                scenes: self.scenes.unwrap_or_default(),
                language: self.language,
                resolution: self.resolution,
                duration_secs: self.duration,
                format: self.format,
            },
        })
    }
}
