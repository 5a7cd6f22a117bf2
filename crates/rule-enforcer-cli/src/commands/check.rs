//! Check command implementation.

use anyhow::{Context, Result};
use rule_enforcer::{RuleEngine, Rules};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config_resolver::{Origin, ResolvedRules};
use crate::OutputFormat;

/// Display name used for a submission read from stdin.
const STDIN_NAME: &str = "<stdin>";

/// Runs the check command.
pub fn run(file: &Path, format: OutputFormat, resolved: &ResolvedRules) -> Result<()> {
    let rules = load_rules(resolved)?;
    let (name, code) = read_submission(file)?;

    tracing::debug!("Checking {name} ({} bytes)", code.len());

    let findings = RuleEngine::new()
        .check(&code, &rules)
        .with_context(|| format!("Failed to parse {name}"))?;

    super::output::print(&name, &code, &findings, format)?;

    if !findings.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

/// Directory searched for project rules: the submission's directory, or the
/// current directory for stdin.
#[must_use]
pub fn project_dir(file: &Path) -> PathBuf {
    if is_stdin(file) {
        return PathBuf::from(".");
    }
    match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn is_stdin(file: &Path) -> bool {
    file.as_os_str() == "-"
}

fn load_rules(resolved: &ResolvedRules) -> Result<Rules> {
    if resolved.origin == Origin::Global {
        tracing::info!("Using global rules: {}", resolved.path.display());
    }
    resolved
        .load()
        .with_context(|| format!("Failed to load {}", resolved.path.display()))
}

fn read_submission(file: &Path) -> Result<(String, String)> {
    if is_stdin(file) {
        let mut code = String::new();
        std::io::stdin()
            .read_to_string(&mut code)
            .context("Failed to read submission from stdin")?;
        return Ok((STDIN_NAME.to_string(), code));
    }

    let code = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    Ok((file.display().to_string(), code))
}
