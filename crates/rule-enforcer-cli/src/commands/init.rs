//! Init command implementation.

use anyhow::{bail, Context, Result};
use rule_enforcer::{DeclarationKind, Disallow, Rules};
use std::path::Path;

/// The starter policy: expect `f`, only `const`, any import, and forbid
/// every construct in `disallow`.
fn starter_rules() -> Rules {
    Rules::new()
        .expected_functions(["f"])
        .valid_declarations([DeclarationKind::Const])
        .allowed_imports(["*"])
        .disallow(Disallow::ALL)
}

fn render(rules: &Rules, as_toml: bool) -> Result<String> {
    if as_toml {
        let body = toml::to_string_pretty(rules).context("Failed to render TOML")?;
        Ok(format!("# rule-enforcer rules\n\n{body}"))
    } else {
        let body = serde_json::to_string_pretty(rules).context("Failed to render JSON")?;
        Ok(format!("{body}\n"))
    }
}

/// Runs the init command.
pub fn run(force: bool, as_toml: bool) -> Result<()> {
    let file_name = if as_toml {
        "rule-enforcer.toml"
    } else {
        "rule-enforcer.json"
    };
    let rules_path = Path::new(file_name);

    if rules_path.exists() && !force {
        bail!(
            "Rules document already exists at {}. Use --force to overwrite.",
            rules_path.display()
        );
    }

    std::fs::write(rules_path, render(&starter_rules(), as_toml)?)
        .with_context(|| format!("Failed to write {}", rules_path.display()))?;

    println!("Created {file_name}");
    println!("\nNext steps:");
    println!("  1. Edit {file_name} to match the exercise");
    println!("  2. Run: rule-enforcer check solution.ts");

    Ok(())
}
