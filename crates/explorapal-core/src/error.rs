// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Explorapal generation backend.
//!
//! [`ExploraError`] covers every failure a provider interaction can produce.
//! Only [`ValidationError`] is ever surfaced to callers of the orchestrators;
//! everything else is absorbed into a degraded [`Outcome`](crate::Outcome).

use std::time::Duration;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The primary error type used across provider traits and pipeline stages.
#[derive(Debug, Error)]
pub enum ExploraError {
    /// Configuration errors (missing credentials, malformed header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Request parameters were rejected before any provider call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The provider rejected or never received a job submission.
    #[error("job submission failed: {message}")]
    Submission {
        message: String,
        source: Option<BoxError>,
    },

    /// The provider reported the job as failed.
    #[error("job {job_id} failed: {message}")]
    JobFailed { job_id: String, message: String },

    /// The job never reached a terminal status within the attempt budget.
    #[error("job still pending after {attempts} status checks ({elapsed:?})")]
    PollTimeout { attempts: u32, elapsed: Duration },

    /// The caller's deadline elapsed or it cancelled the request.
    #[error("request cancelled by caller")]
    Cancelled,

    /// The provider reported a status value this client does not understand.
    #[error("unknown job status `{0}`")]
    UnknownStatus(String),

    /// A request/response round trip failed (network, non-success status).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<BoxError>,
    },

    /// The artifact could not be downloaded.
    #[error("artifact download failed: {message}")]
    Download {
        message: String,
        source: Option<BoxError>,
    },

    /// A provider response could not be decoded into the expected shape.
    #[error("malformed provider response: {message}")]
    Decode {
        message: String,
        source: Option<BoxError>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ExploraError {
    /// Builds a [`ExploraError::Transport`] from any error source.
    pub fn transport(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Builds a [`ExploraError::Decode`] from any error source.
    pub fn decode(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Decode {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns true for failures a polling loop may ride out by trying again
    /// on its normal schedule.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Decode { .. })
    }

    /// Short stable label for the pipeline stage that failed, used as a
    /// structured log field.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Validation(_) => "validation",
            Self::Submission { .. } => "submit",
            Self::JobFailed { .. } => "job",
            Self::PollTimeout { .. } | Self::Cancelled | Self::UnknownStatus(_) => "poll",
            Self::Transport { .. } => "transport",
            Self::Download { .. } => "download",
            Self::Decode { .. } => "decode",
            Self::Internal(_) => "internal",
        }
    }
}

/// Structured rejection of caller-supplied parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Both a script and a prompt with source media were supplied.
    #[error("provide either a script or a prompt with source media, not both")]
    ModeConflict,

    /// Neither a script nor a prompt with source media was supplied.
    #[error("a script or a prompt with source media is required")]
    ModeMissing,

    /// The declared mode disagrees with the populated fields.
    #[error("mode `{declared}` does not match the supplied inputs (looks like `{inferred}`)")]
    ModeMismatch { declared: String, inferred: String },

    /// Requested duration is not within the accepted range.
    #[error("duration {requested}s is outside the accepted range (0, {max}]")]
    DurationOutOfRange { requested: String, max: u32 },

    /// A required text field was empty.
    #[error("`{0}` must not be empty")]
    EmptyField(&'static str),
}
