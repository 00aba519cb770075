// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading.
//!
//! Lookup order: `./explorapal.toml` > `~/.config/explorapal/explorapal.toml`
//! > `/etc/explorapal/explorapal.toml`, with `EXPLORAPAL_*` environment
//! overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ExplorapalConfig;

/// File name searched for in every configuration directory.
pub const CONFIG_FILE_NAME: &str = "explorapal.toml";

/// System-wide configuration path.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/explorapal/explorapal.toml";

/// Sections that `EXPLORAPAL_<SECTION>_<KEY>` variables map into.
const ENV_SECTIONS: &[&str] = &["service", "provider", "models", "media"];

/// Per-user configuration path, when the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("explorapal").join(CONFIG_FILE_NAME))
}

/// Load configuration from every standard location plus the environment.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/explorapal/explorapal.toml`
/// 3. `~/.config/explorapal/explorapal.toml`
/// 4. `./explorapal.toml`
/// 5. `EXPLORAPAL_*` environment variables
pub fn load_config() -> Result<ExplorapalConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only. No files, no environment.
pub fn load_config_from_str(toml_content: &str) -> Result<ExplorapalConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ExplorapalConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file, still honoring the environment.
pub fn load_config_from_path(path: &Path) -> Result<ExplorapalConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ExplorapalConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The figment behind [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ExplorapalConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(CONFIG_FILE_NAME))
        .merge(env_provider())
}

/// `EXPLORAPAL_MEDIA_POLL_INTERVAL_SECS` maps to `media.poll_interval_secs`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// keys containing underscores survive intact.
fn env_provider() -> Env {
    Env::prefixed("EXPLORAPAL_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(
            map_env_key("media_poll_interval_secs"),
            "media.poll_interval_secs"
        );
        assert_eq!(map_env_key("provider_app_id"), "provider.app_id");
        assert_eq!(
            map_env_key("models_video_generation"),
            "models.video_generation"
        );
    }

    #[test]
    fn unknown_prefix_is_left_alone() {
        assert_eq!(map_env_key("stray_value"), "stray_value");
        assert_eq!(map_env_key("mediax_value"), "mediax_value");
    }
}
