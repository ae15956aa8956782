//! promptslider CLI — the main entry point.
//!
//! Commands:
//! - `apply`   — Annotate prompts with their strengths
//! - `tokens`  — List the labels parsed from prompt text
//! - `encode`  — Build a strength payload for a prompt list
//! - `inspect` — Show how a strength payload is interpreted
//! - `config`  — Show, locate, or validate configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use promptslider_core::Assignment;

mod commands;

#[derive(Parser)]
#[command(
    name = "promptslider",
    about = "promptslider — weighted prompt formatting",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of ~/.promptslider/config.toml
    #[arg(long = "config", global = true, env = "PROMPTSLIDER_CONFIG")]
    config_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate each prompt with its clamped strength
    Apply {
        /// Comma/newline separated prompts ("-" reads stdin)
        #[arg(short, long)]
        prompts: String,

        /// JSON strength payload
        #[arg(short, long, default_value = "")]
        strengths: String,
    },

    /// Print the parsed prompt labels, one per line
    Tokens {
        /// Comma/newline separated prompts ("-" reads stdin)
        #[arg(short, long)]
        prompts: String,
    },

    /// Build the JSON strength payload for a prompt list
    Encode {
        /// Comma/newline separated prompts ("-" reads stdin)
        #[arg(short, long, default_value = "")]
        prompts: String,

        /// Previously stored payload to start from
        #[arg(short, long, default_value = "")]
        strengths: String,

        /// Set a strength, as label=value (repeatable)
        #[arg(long = "set", value_name = "LABEL=VALUE")]
        assignments: Vec<Assignment>,

        /// Record the id of the node the prompts came from
        #[arg(long)]
        source_id: Option<i64>,

        /// Reset every strength to the default before applying --set
        #[arg(long)]
        reset: bool,
    },

    /// Show the discovery strategy and resolved strengths of a payload
    Inspect {
        /// JSON strength payload ("-" reads stdin)
        #[arg(short, long)]
        strengths: String,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Validate the config file
    Validate,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config_file.as_deref();
    match cli.command {
        Commands::Apply { prompts, strengths } => {
            commands::apply::run(config_path, &prompts, &strengths)?
        }
        Commands::Tokens { prompts } => commands::tokens::run(&prompts)?,
        Commands::Encode {
            prompts,
            strengths,
            assignments,
            source_id,
            reset,
        } => commands::encode::run(
            config_path,
            commands::encode::EncodeArgs {
                prompts,
                strengths,
                assignments,
                source_id,
                reset,
            },
        )?,
        Commands::Inspect { strengths } => commands::inspect::run(config_path, &strengths)?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show(config_path)?,
            ConfigAction::Path => commands::config_cmd::path(config_path)?,
            ConfigAction::Validate => commands::config_cmd::validate(config_path)?,
        },
    }

    Ok(())
}
