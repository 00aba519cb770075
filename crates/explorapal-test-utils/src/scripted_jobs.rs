// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Job gateway stub with a scripted sequence of status answers.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use explorapal_core::{
    ExploraError, JobHandle, JobProvider, JobSpec, JobStatus, ProviderHints, StatusReport,
};

/// One scripted answer to a status query.
#[derive(Debug, Clone)]
pub enum StatusStep {
    Report(StatusReport),
    /// The query fails like a dropped connection.
    TransportError,
    /// The gateway answers with a status value the client cannot map.
    Unknown(String),
    /// The status body cannot be parsed at all.
    Malformed,
}

impl StatusStep {
    pub fn queued() -> Self {
        Self::Report(StatusReport::new(JobStatus::Queued))
    }

    pub fn running() -> Self {
        Self::Report(StatusReport::new(JobStatus::Running))
    }

    pub fn completed(url: impl Into<String>) -> Self {
        let mut report = StatusReport::new(JobStatus::Completed);
        report.artifact_url = Some(url.into());
        Self::Report(report)
    }

    pub fn completed_with_hints(url: impl Into<String>, hints: ProviderHints) -> Self {
        let mut report = StatusReport::new(JobStatus::Completed);
        report.artifact_url = Some(url.into());
        report.hints = hints;
        Self::Report(report)
    }

    pub fn failed(message: impl Into<String>) -> Self {
        let mut report = StatusReport::new(JobStatus::Failed);
        report.failure_message = Some(message.into());
        Self::Report(report)
    }

    fn answer(&self) -> Result<StatusReport, ExploraError> {
        match self {
            Self::Report(report) => Ok(report.clone()),
            Self::TransportError => Err(ExploraError::Transport {
                message: "connection reset by scripted provider".into(),
                source: None,
            }),
            Self::Unknown(value) => Err(ExploraError::UnknownStatus(value.clone())),
            Self::Malformed => Err(ExploraError::Decode {
                message: "status body is not JSON".into(),
                source: None,
            }),
        }
    }
}

/// A [`JobProvider`] whose answers are fixed up front.
///
/// Status steps are consumed in order; the last one repeats once the script
/// runs out, so `[running]` means "always running". Every call is counted
/// and status calls are timestamped with tokio's clock, which follows
/// paused test time.
pub struct ScriptedJobProvider {
    job_id: String,
    submit_error: Option<String>,
    steps: Mutex<VecDeque<StatusStep>>,
    artifact: Option<Vec<u8>>,
    submitted: Mutex<Vec<JobSpec>>,
    submit_calls: AtomicUsize,
    status_calls: AtomicUsize,
    download_calls: AtomicUsize,
    status_times: Mutex<Vec<Instant>>,
}

impl ScriptedJobProvider {
    /// A provider that accepts jobs and answers status queries with `steps`.
    pub fn new(steps: impl IntoIterator<Item = StatusStep>) -> Self {
        Self {
            job_id: "job-scripted-1".into(),
            submit_error: None,
            steps: Mutex::new(steps.into_iter().collect()),
            artifact: Some(b"\x00\x00\x00\x18ftypisom scripted artifact".to_vec()),
            submitted: Mutex::new(Vec::new()),
            submit_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            download_calls: AtomicUsize::new(0),
            status_times: Mutex::new(Vec::new()),
        }
    }

    /// A provider that never answers anything but `running`.
    pub fn always_running() -> Self {
        Self::new([StatusStep::running()])
    }

    /// Rejects every submission with `message`.
    pub fn rejecting_submissions(mut self, message: impl Into<String>) -> Self {
        self.submit_error = Some(message.into());
        self
    }

    /// Serves `bytes` from every download.
    pub fn with_artifact(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.artifact = Some(bytes.into());
        self
    }

    /// Makes every download fail.
    pub fn failing_downloads(mut self) -> Self {
        self.artifact = None;
        self
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn download_calls(&self) -> usize {
        self.download_calls.load(Ordering::SeqCst)
    }

    /// Total provider calls of any kind.
    pub fn total_calls(&self) -> usize {
        self.submit_calls() + self.status_calls() + self.download_calls()
    }

    /// Instants at which status queries arrived.
    pub async fn status_times(&self) -> Vec<Instant> {
        self.status_times.lock().await.clone()
    }

    /// Specs received by `submit`, in order.
    pub async fn submitted(&self) -> Vec<JobSpec> {
        self.submitted.lock().await.clone()
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl JobProvider for ScriptedJobProvider {
    async fn submit(&self, spec: &JobSpec) -> Result<JobHandle, ExploraError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().await.push(spec.clone());
        match &self.submit_error {
            Some(message) => Err(ExploraError::Submission {
                message: message.clone(),
                source: None,
            }),
            None => Ok(JobHandle(self.job_id.clone())),
        }
    }

    async fn status(&self, _job: &JobHandle) -> Result<StatusReport, ExploraError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.status_times.lock().await.push(Instant::now());

        let mut steps = self.steps.lock().await;
        let step = if steps.len() > 1 {
            steps.pop_front()
        } else {
            steps.front().cloned()
        };
        match step {
            Some(step) => step.answer(),
            None => Ok(StatusReport::new(JobStatus::Running)),
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ExploraError> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        self.artifact.clone().ok_or_else(|| ExploraError::Download {
            message: format!("scripted download failure for {url}"),
            source: None,
        })
    }
}
