// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Asynchronous job provider trait (submit, status, download).

use async_trait::async_trait;

use crate::error::ExploraError;
use crate::types::{JobHandle, JobSpec, StatusReport};

/// A remote service that runs long generation jobs.
///
/// The provider owns the job state machine; implementations only relay it.
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait JobProvider: Send + Sync {
    /// Registers a new job and returns its handle.
    ///
    /// Any failure is reported as [`ExploraError::Submission`].
    async fn submit(&self, spec: &JobSpec) -> Result<JobHandle, ExploraError>;

    /// Queries the current state of a job once.
    async fn status(&self, job: &JobHandle) -> Result<StatusReport, ExploraError>;

    /// Fetches a finished artifact.
    ///
    /// Any failure is reported as [`ExploraError::Download`].
    async fn download(&self, url: &str) -> Result<Vec<u8>, ExploraError>;
}
