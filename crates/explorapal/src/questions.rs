// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `explorapal questions` command implementation.

use std::io::IsTerminal;

use clap::Args;
use explorapal_config::ExplorapalConfig;
use explorapal_core::{ExploraError, Outcome};
use explorapal_dialogue::{Assistant, Question};

#[derive(Args, Debug)]
pub struct QuestionsArgs {
    /// What the child is looking at or asking about.
    #[arg(long)]
    pub context: String,

    /// Exploration category, e.g. `dinosaur`.
    #[arg(long, default_value = "general")]
    pub category: String,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Disable colors.
    #[arg(long)]
    pub plain: bool,
}

pub async fn run_questions(
    config: &ExplorapalConfig,
    args: QuestionsArgs,
) -> Result<(), ExploraError> {
    let assistant = Assistant::from_config(config)?;
    let outcome = assistant
        .generate_questions(&args.context, &args.category)
        .await?;

    if args.json {
        let text = serde_json::to_string_pretty(&outcome)
            .map_err(|e| ExploraError::Internal(format!("failed to serialize questions: {e}")))?;
        println!("{text}");
    } else {
        let use_color = !args.plain && std::io::stdout().is_terminal();
        print_questions(&outcome, use_color);
    }
    Ok(())
}

fn print_questions(outcome: &Outcome<Vec<Question>>, use_color: bool) {
    println!();
    if outcome.degraded {
        if use_color {
            use colored::Colorize;
            println!("  {} {}", "!".yellow(), outcome.message.yellow());
        } else {
            println!("  [PLACEHOLDER] {}", outcome.message);
        }
    }
    for (i, q) in outcome.value.iter().enumerate() {
        println!("  {}. {}", i + 1, q.content);
        println!("     {} / {}: {}", q.question_type, q.difficulty, q.purpose);
    }
    println!();
}
