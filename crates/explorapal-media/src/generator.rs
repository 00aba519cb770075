// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Top-level media generation: validate, submit, poll, fetch, normalize,
//! and degrade to a placeholder on any failure after validation.

use std::sync::Arc;
use std::time::Duration;

use explorapal_config::{ExplorapalConfig, MediaConfig};
use explorapal_core::{
    ExploraError, GenerationRequest, GenerationResult, JobProvider, Outcome, ValidationError,
};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::client::AsyncJobClient;
use crate::fallback;
use crate::normalize;
use crate::poller::Poller;
use crate::request::{self, ValidatedRequest};

pub struct MediaGenerator {
    provider: Arc<dyn JobProvider>,
    poller: Poller,
    model: String,
    media: MediaConfig,
}

impl MediaGenerator {
    pub fn new(provider: Arc<dyn JobProvider>, model: impl Into<String>, media: MediaConfig) -> Self {
        Self {
            provider,
            poller: Poller::from_config(&media),
            model: model.into(),
            media,
        }
    }

    /// Wires an [`AsyncJobClient`] from configuration.
    pub fn from_config(config: &ExplorapalConfig) -> Result<Self, ExploraError> {
        let client = AsyncJobClient::from_config(config)?;
        Ok(Self::new(
            Arc::new(client),
            config.models.video_generation.clone(),
            config.media.clone(),
        ))
    }

    /// Generates media for `request`.
    ///
    /// Only a malformed request is an error, and it is reported before any
    /// provider call. Every later failure yields a placeholder with
    /// `degraded` set.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<Outcome<GenerationResult>, ValidationError> {
        let validated = request::validate(request, &self.media)?;
        let started = Instant::now();

        match self.run(&validated, cancel).await {
            Ok(result) => {
                info!(
                    mode = %validated.mode,
                    bytes = result.artifact.len(),
                    format = %result.format,
                    duration_secs = result.duration_secs,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "media generated"
                );
                Ok(Outcome::genuine(result, "video generated"))
            }
            Err(err) => {
                warn!(
                    mode = %validated.mode,
                    stage = err.stage(),
                    error = %err,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "media generation failed, returning placeholder"
                );
                let placeholder = fallback::synthesize(&validated, &self.media.default_resolution);
                Ok(Outcome::fallback(placeholder, &err))
            }
        }
    }

    /// [`generate`](Self::generate) bounded by `deadline`.
    ///
    /// When the deadline passes the pipeline is cancelled and winds down to
    /// a placeholder instead of being dropped mid-flight.
    pub async fn generate_within(
        &self,
        request: &GenerationRequest,
        deadline: Duration,
    ) -> Result<Outcome<GenerationResult>, ValidationError> {
        let cancel = CancellationToken::new();
        let generation = self.generate(request, &cancel);
        tokio::pin!(generation);

        tokio::select! {
            result = &mut generation => return result,
            _ = tokio::time::sleep(deadline) => {
                info!(deadline_ms = deadline.as_millis() as u64, "generation deadline reached");
            }
        }
        cancel.cancel();
        generation.await
    }

    async fn run(
        &self,
        request: &ValidatedRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult, ExploraError> {
        let spec = request.job_spec(&self.model);

        let job = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ExploraError::Cancelled),
            job = self.provider.submit(&spec) => job?,
        };
        info!(job_id = %job, mode = %request.mode, "job submitted");

        let completed = self.poller.poll(self.provider.as_ref(), &job, cancel).await?;

        let artifact = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ExploraError::Cancelled),
            bytes = self.provider.download(&completed.artifact_url) => bytes?,
        };

        Ok(normalize::normalize(
            request,
            &completed.report,
            artifact,
            &self.media.default_resolution,
        ))
    }
}
