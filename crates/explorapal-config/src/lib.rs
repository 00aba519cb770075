// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Explorapal generation backend.
//!
//! TOML files are merged with `EXPLORAPAL_*` environment overrides, strictly
//! deserialized (`deny_unknown_fields`), then validated. Failures come back
//! as miette diagnostics with typo suggestions.
//!
//! ```no_run
//! use explorapal_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("polling every {}s", config.media.poll_interval_secs);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{ExplorapalConfig, MediaConfig, ModelsConfig, ProviderConfig, ServiceConfig};

use std::path::Path;

/// Loads from the standard locations and validates.
pub fn load_and_validate() -> Result<ExplorapalConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Loads an explicit file (plus environment overrides) and validates.
pub fn load_and_validate_path(path: &Path) -> Result<ExplorapalConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        std::fs::read_to_string(path)
            .map(|content| vec![(path.display().to_string(), content)])
            .unwrap_or_default()
    })
}

/// Loads a TOML string and validates. Used by tests and `check-config`.
pub fn load_and_validate_str(toml_content: &str) -> Result<ExplorapalConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

fn finish(
    loaded: Result<ExplorapalConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<ExplorapalConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// The compiled defaults as a TOML document, for `explorapal check-config --defaults`.
pub fn render_default_config() -> Result<String, ConfigError> {
    toml::to_string_pretty(&ExplorapalConfig::default())
        .map_err(|e| ConfigError::Other(format!("failed to render defaults: {e}")))
}

fn collect_toml_sources() -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|d| d.join(loader::CONFIG_FILE_NAME))
        .unwrap_or_else(|_| loader::CONFIG_FILE_NAME.into());

    [
        Some(local),
        loader::user_config_path(),
        Some(loader::SYSTEM_CONFIG_PATH.into()),
    ]
    .into_iter()
    .flatten()
    .filter_map(|path| {
        std::fs::read_to_string(&path)
            .ok()
            .map(|content| (path.display().to_string(), content))
    })
    .collect()
}
