// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Explorapal backend.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key fails
//! at startup instead of silently falling back to a default.

use std::time::Duration;

use explorapal_core::{AppCredentials, ExploraError};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// Environment variable consulted when `provider.app_id` is unset.
pub const APP_ID_ENV: &str = "TAL_MLOPS_APP_ID";

/// Environment variable consulted when `provider.app_key` is unset.
pub const APP_KEY_ENV: &str = "TAL_MLOPS_APP_KEY";

/// Top-level Explorapal configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExplorapalConfig {
    /// Service identity and logging.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Remote AI provider endpoints and credentials.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Model identifiers per capability.
    #[serde(default)]
    pub models: ModelsConfig,

    /// Media job submission, polling and download tuning.
    #[serde(default)]
    pub media: MediaConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Name reported in logs.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "explorapal".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Remote provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Application identifier. `None` falls back to `TAL_MLOPS_APP_ID`.
    #[serde(default)]
    pub app_id: Option<String>,

    /// Application secret. `None` falls back to `TAL_MLOPS_APP_KEY`.
    /// Never serialized back out.
    #[serde(default, deserialize_with = "deserialize_secret", skip_serializing)]
    pub app_key: Option<SecretString>,

    /// OpenAI-compatible endpoint for synchronous chat completions.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Endpoint of the asynchronous job gateway.
    #[serde(default = "default_async_base_url")]
    pub async_base_url: String,

    /// Timeout for a synchronous chat round trip, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum tokens per completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            app_key: None,
            base_url: default_base_url(),
            async_base_url: default_async_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl ProviderConfig {
    /// Resolves credentials: config values first, then the environment.
    pub fn credentials(&self) -> Result<AppCredentials, ExploraError> {
        let app_id = resolve("provider.app_id", self.app_id.as_deref(), APP_ID_ENV)?;
        let app_key = resolve(
            "provider.app_key",
            self.app_key.as_ref().map(|key| key.expose_secret()),
            APP_KEY_ENV,
        )?;
        Ok(AppCredentials::new(app_id, SecretString::from(app_key)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

fn resolve(key: &str, configured: Option<&str>, env_var: &str) -> Result<String, ExploraError> {
    if let Some(value) = configured.map(str::trim).filter(|v| !v.is_empty()) {
        return Ok(value.to_string());
    }
    match std::env::var(env_var) {
        Ok(value) if !value.trim().is_empty() => {
            debug!(key, env_var, "credential resolved from environment");
            Ok(value.trim().to_string())
        }
        _ => Err(ExploraError::Config(format!(
            "{key} is not set and {env_var} is not in the environment"
        ))),
    }
}

fn default_base_url() -> String {
    "http://ai-service.tal.com/openai-compatible/v1".to_string()
}

fn default_async_base_url() -> String {
    "http://apx-api.tal.com/v1/async".to_string()
}

fn default_request_timeout_secs() -> u64 {
    70
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_temperature() -> f32 {
    0.7
}

/// Model identifier per capability, resolved once at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelsConfig {
    #[serde(default = "default_image_analysis_model")]
    pub image_analysis: String,

    #[serde(default = "default_text_generation_model")]
    pub text_generation: String,

    #[serde(default = "default_advanced_reasoning_model")]
    pub advanced_reasoning: String,

    #[serde(default = "default_voice_model")]
    pub voice: String,

    #[serde(default = "default_video_analysis_model")]
    pub video_analysis: String,

    #[serde(default = "default_video_generation_model")]
    pub video_generation: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            image_analysis: default_image_analysis_model(),
            text_generation: default_text_generation_model(),
            advanced_reasoning: default_advanced_reasoning_model(),
            voice: default_voice_model(),
            video_analysis: default_video_analysis_model(),
            video_generation: default_video_generation_model(),
        }
    }
}

fn default_image_analysis_model() -> String {
    "qwen3-vl-plus".to_string()
}

fn default_text_generation_model() -> String {
    "qwen-flash".to_string()
}

fn default_advanced_reasoning_model() -> String {
    "qwen3-max".to_string()
}

fn default_voice_model() -> String {
    "qwen3-omni-flash".to_string()
}

fn default_video_analysis_model() -> String {
    "qwen3-omni-flash".to_string()
}

fn default_video_generation_model() -> String {
    "Doubao-Seedance-1.0-lite-i2v".to_string()
}

/// Media generation tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MediaConfig {
    /// Fixed delay between job status checks, in seconds.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Maximum number of status checks before giving up.
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,

    /// Timeout for a single status check, in seconds.
    #[serde(default = "default_short_timeout_secs")]
    pub status_timeout_secs: u64,

    /// Timeout for the job submission call, in seconds.
    #[serde(default = "default_short_timeout_secs")]
    pub submit_timeout_secs: u64,

    /// Timeout for the artifact download, in seconds.
    #[serde(default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,

    /// Duration used when a request does not ask for one, in seconds.
    #[serde(default = "default_duration_secs")]
    pub default_duration_secs: u32,

    /// Longest duration a request may ask for, in seconds.
    #[serde(default = "default_max_duration_secs")]
    pub max_duration_secs: u32,

    #[serde(default = "default_style")]
    pub default_style: String,

    #[serde(default = "default_voice")]
    pub default_voice: String,

    #[serde(default = "default_language")]
    pub default_language: String,

    #[serde(default = "default_resolution")]
    pub default_resolution: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            max_poll_attempts: default_max_poll_attempts(),
            status_timeout_secs: default_short_timeout_secs(),
            submit_timeout_secs: default_short_timeout_secs(),
            download_timeout_secs: default_download_timeout_secs(),
            default_duration_secs: default_duration_secs(),
            max_duration_secs: default_max_duration_secs(),
            default_style: default_style(),
            default_voice: default_voice(),
            default_language: default_language(),
            default_resolution: default_resolution(),
        }
    }
}

impl MediaConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_secs(self.status_timeout_secs)
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    /// Worst-case time the poller can hold a request open.
    pub fn max_poll_duration(&self) -> Duration {
        self.poll_interval() * self.max_poll_attempts.saturating_sub(1)
            + self.status_timeout() * self.max_poll_attempts
    }
}

fn default_poll_interval_secs() -> u64 {
    10
}

fn default_max_poll_attempts() -> u32 {
    60
}

fn default_short_timeout_secs() -> u64 {
    30
}

fn default_download_timeout_secs() -> u64 {
    300
}

fn default_duration_secs() -> u32 {
    60
}

fn default_max_duration_secs() -> u32 {
    300
}

fn default_style() -> String {
    "educational".to_string()
}

fn default_voice() -> String {
    "female".to_string()
}

fn default_language() -> String {
    "zh-CN".to_string()
}

fn default_resolution() -> String {
    "1920x1080".to_string()
}
