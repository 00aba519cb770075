// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Explorapal - AI media and dialogue backend for children's explorations.
//!
//! This is the command-line entry point.

mod check;
mod questions;
mod shutdown;
mod video;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use explorapal_config::{ConfigError, ExplorapalConfig};
use tracing::error;

/// Explorapal - AI media and dialogue backend for children's explorations.
#[derive(Parser, Debug)]
#[command(name = "explorapal", version, about, long_about = None)]
struct Cli {
    /// Load this file instead of searching the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate configuration and print the effective settings.
    CheckConfig {
        /// Print the built-in defaults as TOML instead.
        #[arg(long)]
        defaults: bool,
    },
    /// Generate a learning video from a script or from a picture.
    Video(video::VideoArgs),
    /// Generate guiding questions about what a child is exploring.
    Questions(questions::QuestionsArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Commands::CheckConfig { defaults: true } = cli.command {
        match explorapal_config::render_default_config() {
            Ok(text) => print!("{text}"),
            Err(err) => {
                explorapal_config::render_errors(&[err]);
                std::process::exit(1);
            }
        }
        return;
    }

    let config = match load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            explorapal_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.service.log_level);

    let result = match cli.command {
        Commands::CheckConfig { .. } => check::run_check(&config),
        Commands::Video(args) => video::run_video(&config, args).await,
        Commands::Questions(args) => questions::run_questions(&config, args).await,
    };

    if let Err(err) = result {
        error!(stage = err.stage(), error = %err, "command failed");
        eprintln!("explorapal: {err}");
        std::process::exit(1);
    }
}

fn load(path: Option<&Path>) -> Result<ExplorapalConfig, Vec<ConfigError>> {
    match path {
        Some(path) => explorapal_config::load_and_validate_path(path),
        None => explorapal_config::load_and_validate(),
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the configured level.
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("explorapal={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_check_config_defaults() {
        let cli = Cli::try_parse_from(["explorapal", "check-config", "--defaults"]).unwrap();
        assert!(matches!(cli.command, Commands::CheckConfig { defaults: true }));
    }

    #[test]
    fn global_config_flag_follows_subcommand() {
        let cli = Cli::try_parse_from([
            "explorapal",
            "questions",
            "--context",
            "a fossil",
            "--config",
            "/tmp/explorapal.toml",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/explorapal.toml")));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["explorapal"]).is_err());
    }

    #[test]
    fn binary_loads_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("explorapal.toml");
        std::fs::write(&path, "[media]\nmax_poll_attempts = 12\n").unwrap();
        let config = load(Some(&path)).expect("valid config file");
        assert_eq!(config.media.max_poll_attempts, 12);
    }
}
