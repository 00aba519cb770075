// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `explorapal check-config` command implementation.

use explorapal_config::ExplorapalConfig;
use explorapal_core::ExploraError;

/// Prints the effective configuration. Secrets are reported only as
/// present or missing.
pub fn run_check(config: &ExplorapalConfig) -> Result<(), ExploraError> {
    for line in summary_lines(config) {
        println!("{line}");
    }
    Ok(())
}

fn summary_lines(config: &ExplorapalConfig) -> Vec<String> {
    let credentials = match config.provider.credentials() {
        Ok(creds) => format!("configured (app_id={})", creds.app_id()),
        Err(err) => format!("missing: {err}"),
    };
    let media = &config.media;

    vec![
        String::new(),
        format!("  {} configuration", config.service.name),
        format!("  {}", "-".repeat(35)),
        format!("    Log level:    {}", config.service.log_level),
        format!("    Credentials:  {credentials}"),
        format!("    Chat API:     {}", config.provider.base_url),
        format!("    Job API:      {}", config.provider.async_base_url),
        format!("    Video model:  {}", config.models.video_generation),
        format!("    Text model:   {}", config.models.text_generation),
        format!(
            "    Polling:      every {}s, at most {} checks (worst case {}s)",
            media.poll_interval_secs,
            media.max_poll_attempts,
            media.max_poll_duration().as_secs()
        ),
        format!(
            "    Duration:     default {}s, max {}s",
            media.default_duration_secs, media.max_duration_secs
        ),
        String::new(),
    ]
}
