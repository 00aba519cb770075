// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-interval, bounded-attempt job status polling.
//!
//! No backoff: attempts are spaced by a constant interval. A transient query
//! failure consumes an attempt and the loop carries on. Cancellation is
//! observed at the top of every attempt and raced against both the status
//! query and the sleep, so a caller deadline never waits out an interval.

use std::time::Duration;

use explorapal_config::MediaConfig;
use explorapal_core::{ExploraError, JobHandle, JobProvider, JobStatus, StatusReport};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// A finished job: the artifact URL plus the report it came with.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedJob {
    pub artifact_url: String,
    pub report: StatusReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poller {
    interval: Duration,
    max_attempts: u32,
}

impl Poller {
    /// `max_attempts` is clamped to at least one query.
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_config(media: &MediaConfig) -> Self {
        Self::new(media.poll_interval(), media.max_poll_attempts)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Polls `job` until it settles, the budget runs out, or `cancel` fires.
    ///
    /// There is no sleep after the last query, so an unfinished job reports
    /// [`ExploraError::PollTimeout`] after `(max_attempts - 1) * interval`
    /// plus the time spent in the queries themselves.
    pub async fn poll(
        &self,
        provider: &dyn JobProvider,
        job: &JobHandle,
        cancel: &CancellationToken,
    ) -> Result<CompletedJob, ExploraError> {
        let started = Instant::now();

        for attempt in 1..=self.max_attempts {
            if cancel.is_cancelled() {
                info!(job_id = %job, attempt, "polling cancelled");
                return Err(ExploraError::Cancelled);
            }

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(job_id = %job, attempt, "polling cancelled during status query");
                    return Err(ExploraError::Cancelled);
                }
                outcome = provider.status(job) => outcome,
            };

            match outcome {
                Ok(report) => match report.status {
                    JobStatus::Completed => {
                        let Some(url) = report.artifact_url.clone() else {
                            return Err(ExploraError::Decode {
                                message: format!("job {job} completed without an artifact URL"),
                                source: None,
                            });
                        };
                        info!(
                            job_id = %job,
                            attempt,
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            "job completed"
                        );
                        return Ok(CompletedJob {
                            artifact_url: url,
                            report,
                        });
                    }
                    JobStatus::Failed => {
                        let message = report
                            .failure_message
                            .unwrap_or_else(|| "provider reported failure without a message".into());
                        return Err(ExploraError::JobFailed {
                            job_id: job.to_string(),
                            message,
                        });
                    }
                    status @ (JobStatus::Queued | JobStatus::Running) => {
                        debug!(job_id = %job, attempt, status = %status, "job not finished");
                    }
                },
                Err(err) if err.is_transient() => {
                    warn!(job_id = %job, attempt, error = %err, "status query failed, will retry");
                }
                Err(err) => return Err(err),
            }

            if attempt == self.max_attempts {
                break;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(job_id = %job, attempt, "polling cancelled while waiting");
                    return Err(ExploraError::Cancelled);
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        let elapsed = started.elapsed();
        warn!(
            job_id = %job,
            attempts = self.max_attempts,
            elapsed_ms = elapsed.as_millis() as u64,
            "job did not finish within the attempt budget"
        );
        Err(ExploraError::PollTimeout {
            attempts: self.max_attempts,
            elapsed,
        })
    }
}
