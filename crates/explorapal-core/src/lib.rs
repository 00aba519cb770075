// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Explorapal generation backend.
//!
//! Provides the error taxonomy, the domain types exchanged between the
//! orchestrators and their callers, the provider traits, and the text
//! sanitizer every component applies to provider output.

pub mod error;
pub mod text;
pub mod traits;
pub mod types;

pub use error::{ExploraError, ValidationError};
pub use traits::{ChatProvider, JobProvider};
pub use types::{
    AppCredentials, ChatMessage, ChatRequest, ContentPart, GenerationMode, GenerationRequest,
    GenerationResult, JobHandle, JobSpec, JobStatus, Metadata, Outcome, ProviderHints,
    SourceMedia, StatusReport,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use std::time::Duration;

    #[test]
    fn job_status_terminality() {
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn job_status_codes_and_names() {
        assert_eq!(JobStatus::from_code(1), Some(JobStatus::Queued));
        assert_eq!(JobStatus::from_code(3), Some(JobStatus::Completed));
        assert_eq!(JobStatus::from_code(9), None);
        assert_eq!(JobStatus::from_name(" SUCCEEDED "), Some(JobStatus::Completed));
        assert_eq!(JobStatus::from_name("pending"), Some(JobStatus::Queued));
        assert_eq!(JobStatus::from_name("paused"), None);
    }

    #[test]
    fn job_status_display_round_trips() {
        for status in [
            JobStatus::Queued,
            JobStatus::Running,
            JobStatus::Completed,
            JobStatus::Failed,
        ] {
            let parsed = JobStatus::from_str(&status.to_string()).expect("should parse back");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn generation_mode_serializes_snake_case() {
        let json = serde_json::to_string(&GenerationMode::MediaToMedia).unwrap();
        assert_eq!(json, "\"media_to_media\"");
        assert_eq!(GenerationMode::TextToMedia.to_string(), "text_to_media");
    }

    #[test]
    fn transient_errors_are_transport_and_decode() {
        assert!(ExploraError::Transport { message: "x".into(), source: None }.is_transient());
        assert!(ExploraError::Decode { message: "x".into(), source: None }.is_transient());
        assert!(!ExploraError::Cancelled.is_transient());
        assert!(
            !ExploraError::PollTimeout { attempts: 3, elapsed: Duration::from_secs(1) }
                .is_transient()
        );
    }

    #[test]
    fn fallback_outcome_is_always_degraded() {
        let err = ExploraError::JobFailed {
            job_id: "job-1".into(),
            message: "quota exceeded".into(),
        };
        let outcome = Outcome::fallback(5u8, &err);
        assert!(outcome.degraded);
        assert!(outcome.message.contains("quota exceeded"), "got: {}", outcome.message);

        let genuine = Outcome::genuine(5u8, "ok").map(|v| v * 2);
        assert!(!genuine.degraded);
        assert_eq!(genuine.value, 10);
    }

    #[test]
    fn credentials_debug_hides_key() {
        let creds = AppCredentials::new("app", "s3cret".to_string().into());
        let debug = format!("{creds:?}");
        assert!(!debug.contains("s3cret"));
        assert_eq!(creds.bearer(), "Bearer app:s3cret");
    }

    #[test]
    fn validation_error_converts_into_explora_error() {
        let err: ExploraError = ValidationError::ModeConflict.into();
        assert_eq!(err.stage(), "validation");
    }
}
