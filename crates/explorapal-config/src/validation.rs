// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks serde cannot express: nonzero intervals, sane duration
//! bounds, usable endpoint URLs. All problems are collected, not just the first.

use crate::diagnostic::ConfigError;
use crate::model::ExplorapalConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

pub fn validate_config(config: &ExplorapalConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.service.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ConfigError::validation(format!(
            "service.log_level `{}` is not one of {}",
            config.service.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    for (key, url) in [
        ("provider.base_url", &config.provider.base_url),
        ("provider.async_base_url", &config.provider.async_base_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ConfigError::validation(format!(
                "{key} must be an http(s) URL, got `{url}`"
            )));
        }
    }

    if config.provider.request_timeout_secs == 0 {
        errors.push(ConfigError::validation(
            "provider.request_timeout_secs must be greater than zero",
        ));
    }

    if config.provider.max_tokens == 0 {
        errors.push(ConfigError::validation(
            "provider.max_tokens must be greater than zero",
        ));
    }

    let temperature = config.provider.temperature;
    if !(0.0..=2.0).contains(&temperature) {
        errors.push(ConfigError::validation(format!(
            "provider.temperature must be within [0, 2], got {temperature}"
        )));
    }

    let models = &config.models;
    for (key, value) in [
        ("models.image_analysis", &models.image_analysis),
        ("models.text_generation", &models.text_generation),
        ("models.advanced_reasoning", &models.advanced_reasoning),
        ("models.voice", &models.voice),
        ("models.video_analysis", &models.video_analysis),
        ("models.video_generation", &models.video_generation),
    ] {
        if value.trim().is_empty() {
            errors.push(ConfigError::validation(format!("{key} must not be empty")));
        }
    }

    let media = &config.media;
    for (key, value) in [
        ("media.poll_interval_secs", media.poll_interval_secs),
        ("media.status_timeout_secs", media.status_timeout_secs),
        ("media.submit_timeout_secs", media.submit_timeout_secs),
        ("media.download_timeout_secs", media.download_timeout_secs),
        ("media.max_poll_attempts", u64::from(media.max_poll_attempts)),
        ("media.max_duration_secs", u64::from(media.max_duration_secs)),
    ] {
        if value == 0 {
            errors.push(ConfigError::validation(format!(
                "{key} must be greater than zero"
            )));
        }
    }

    if media.default_duration_secs == 0 || media.default_duration_secs > media.max_duration_secs {
        errors.push(ConfigError::validation(format!(
            "media.default_duration_secs must be within (0, {}], got {}",
            media.max_duration_secs, media.default_duration_secs
        )));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &ExplorapalConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&ExplorapalConfig::default()).is_ok());
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let mut config = ExplorapalConfig::default();
        config.media.poll_interval_secs = 0;
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("media.poll_interval_secs")));
    }

    #[test]
    fn default_duration_above_max_is_rejected() {
        let mut config = ExplorapalConfig::default();
        config.media.default_duration_secs = 400;
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("default_duration_secs")));
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let mut config = ExplorapalConfig::default();
        config.provider.async_base_url = "apx-api.tal.com/v1/async".into();
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("provider.async_base_url")));
    }

    #[test]
    fn all_problems_are_reported_together() {
        let mut config = ExplorapalConfig::default();
        config.service.log_level = "loud".into();
        config.provider.temperature = 3.5;
        config.models.voice = " ".into();
        assert_eq!(messages(&config).len(), 3);
    }
}
