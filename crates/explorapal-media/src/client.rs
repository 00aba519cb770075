// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the asynchronous job gateway.
//!
//! [`AsyncJobClient`] submits jobs, queries their status and downloads the
//! finished artifact. Each call has its own timeout; the download timeout is
//! independent of (and normally much longer than) the status timeout.

use std::time::Duration;

use async_trait::async_trait;
use explorapal_config::{ExplorapalConfig, MediaConfig};
use explorapal_core::text::{non_blank, sanitize_utf8};
use explorapal_core::{AppCredentials, ExploraError, JobHandle, JobProvider, JobSpec, StatusReport};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::types::{StatusBody, SubmitBody, SubmitResponse};

/// Per-call timeouts for the three gateway operations.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub submit: Duration,
    pub status: Duration,
    pub download: Duration,
}

impl From<&MediaConfig> for Timeouts {
    fn from(media: &MediaConfig) -> Self {
        Self {
            submit: media.submit_timeout(),
            status: media.status_timeout(),
            download: media.download_timeout(),
        }
    }
}

/// [`JobProvider`] backed by the gateway's REST API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct AsyncJobClient {
    client: reqwest::Client,
    /// Artifact URLs usually point at a CDN, so downloads carry no credentials.
    downloader: reqwest::Client,
    base_url: String,
    timeouts: Timeouts,
}

impl AsyncJobClient {
    /// Creates a client for `model` at `base_url`.
    pub fn new(
        credentials: &AppCredentials,
        base_url: impl Into<String>,
        model: &str,
        timeouts: Timeouts,
    ) -> Result<Self, ExploraError> {
        let token = credentials.token();
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, sensitive_header(&credentials.bearer())?);
        headers.insert("api-key", sensitive_header(&token)?);
        headers.insert(
            "X-APX-Model",
            HeaderValue::from_str(model)
                .map_err(|e| ExploraError::Config(format!("invalid model header value: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ExploraError::transport("failed to build HTTP client", e))?;
        let downloader = reqwest::Client::builder()
            .build()
            .map_err(|e| ExploraError::transport("failed to build download client", e))?;

        Ok(Self {
            client,
            downloader,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeouts,
        })
    }

    /// Creates a client from loaded configuration.
    pub fn from_config(config: &ExplorapalConfig) -> Result<Self, ExploraError> {
        let credentials = config.provider.credentials()?;
        Self::new(
            &credentials,
            config.provider.async_base_url.clone(),
            &config.models.video_generation,
            Timeouts::from(&config.media),
        )
    }
}

fn sensitive_header(value: &str) -> Result<HeaderValue, ExploraError> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|e| ExploraError::Config(format!("invalid credential header value: {e}")))?;
    header.set_sensitive(true);
    Ok(header)
}

/// Decodes a JSON body after repairing any invalid UTF-8 in it.
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_str(&sanitize_utf8(bytes))
}

#[async_trait]
impl JobProvider for AsyncJobClient {
    async fn submit(&self, spec: &JobSpec) -> Result<JobHandle, ExploraError> {
        let url = format!("{}/chat", self.base_url);
        let body = SubmitBody {
            model: &spec.model,
            img_url: spec.image_data_url.as_deref(),
            prompt: &spec.prompt,
            duration: format!("{:.0}", spec.duration_secs),
        };

        let response = self
            .client
            .post(&url)
            .timeout(self.timeouts.submit)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExploraError::Submission {
                message: format!("request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| ExploraError::Submission {
            message: format!("failed to read body: {e}"),
            source: Some(Box::new(e)),
        })?;
        debug!(status = %status, len = bytes.len(), "submit response received");

        if !status.is_success() {
            return Err(ExploraError::Submission {
                message: format!("gateway returned {status}: {}", sanitize_utf8(&bytes)),
                source: None,
            });
        }

        let parsed: SubmitResponse = decode_body(&bytes).map_err(|e| ExploraError::Submission {
            message: format!("unparseable body: {e}"),
            source: Some(Box::new(e)),
        })?;

        match non_blank(parsed.id.as_deref()) {
            Some(id) => Ok(JobHandle(id.to_string())),
            None => Err(ExploraError::Submission {
                message: format!(
                    "response carried no job id{}",
                    parsed.message.map(|m| format!(": {m}")).unwrap_or_default()
                ),
                source: None,
            }),
        }
    }

    async fn status(&self, job: &JobHandle) -> Result<StatusReport, ExploraError> {
        let url = format!("{}/results/{}", self.base_url, job.as_str());

        let response = self
            .client
            .get(&url)
            .timeout(self.timeouts.status)
            .send()
            .await
            .map_err(|e| ExploraError::transport(format!("status query failed: {e}"), e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ExploraError::transport(format!("failed to read status body: {e}"), e))?;
        debug!(job_id = %job, status = %status, len = bytes.len(), "status response received");

        if !status.is_success() {
            return Err(ExploraError::Transport {
                message: format!("status query returned {status}: {}", sanitize_utf8(&bytes)),
                source: None,
            });
        }

        decode_body::<StatusBody>(&bytes)
            .map_err(|e| ExploraError::decode(format!("unparseable status body: {e}"), e))?
            .into_report()
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ExploraError> {
        let response = self
            .downloader
            .get(url)
            .timeout(self.timeouts.download)
            .send()
            .await
            .map_err(|e| ExploraError::Download {
                message: format!("request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExploraError::Download {
                message: format!("artifact host returned {status}"),
                source: None,
            });
        }

        let bytes = response.bytes().await.map_err(|e| ExploraError::Download {
            message: format!("failed to read artifact: {e}"),
            source: Some(Box::new(e)),
        })?;
        debug!(len = bytes.len(), "artifact downloaded");

        if bytes.is_empty() {
            return Err(ExploraError::Download {
                message: "artifact body is empty".into(),
                source: None,
            });
        }
        Ok(bytes.to_vec())
    }
}
