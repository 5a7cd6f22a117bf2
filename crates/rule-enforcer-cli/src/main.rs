//! rule-enforcer CLI tool.
//!
//! Usage:
//! ```bash
//! rule-enforcer check [OPTIONS] <FILE>
//! rule-enforcer list-rules
//! rule-enforcer init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Checks exercise submissions against a rules document
#[derive(Parser)]
#[command(name = "rule-enforcer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the rules document (JSON or TOML)
    #[arg(short, long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a submission
    Check {
        /// Submission to check, or `-` to read stdin
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List available detectors
    ListRules,

    /// Write a starter rules document
    Init {
        /// Overwrite an existing rules document
        #[arg(long)]
        force: bool,

        /// Write TOML instead of JSON
        #[arg(long)]
        toml: bool,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Diagnostics with source snippets.
    #[default]
    Text,
    /// The violation list as JSON.
    Json,
    /// One line per violation.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check { file, format } => {
            let project_dir = commands::check::project_dir(&file);
            let resolved = config_resolver::resolve(&project_dir, cli.rules.as_deref())?;
            commands::check::run(&file, format, &resolved)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force, toml } => commands::init::run(force, toml),
    }
}
