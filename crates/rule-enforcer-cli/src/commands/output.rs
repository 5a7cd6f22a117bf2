//! Output formatting for check results.

use anyhow::Result;
use rule_enforcer::{Finding, RuleViolation, Span, ViolationDiagnostic};

use crate::OutputFormat;

/// Print findings for one submission in the specified format.
pub fn print(name: &str, code: &str, findings: &[Finding], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(name, code, findings),
        OutputFormat::Json => return print_json(findings),
        OutputFormat::Compact => print_compact(name, code, findings),
    }
    Ok(())
}

fn print_text(name: &str, code: &str, findings: &[Finding]) {
    for finding in findings {
        let report = miette::Report::new(ViolationDiagnostic::new(finding, name, code));
        println!("{report:?}");
    }

    let summary_color = if findings.is_empty() {
        "\x1b[32m"
    } else {
        "\x1b[31m"
    };

    println!(
        "{}Found {} violation(s) in {}\x1b[0m",
        summary_color,
        findings.len(),
        name
    );
}

fn print_json(findings: &[Finding]) -> Result<()> {
    let violations: Vec<&RuleViolation> = findings.iter().map(|f| &f.violation).collect();
    let json = serde_json::to_string_pretty(&violations)?;
    println!("{json}");
    Ok(())
}

fn print_compact(name: &str, code: &str, findings: &[Finding]) {
    for finding in findings {
        println!("{}", compact_line(name, code, finding));
    }
}

fn compact_line(name: &str, code: &str, finding: &Finding) -> String {
    let (line, column) = finding
        .span
        .map_or((1, 1), |span| line_column(code, span));
    format!(
        "{name}:{line}:{column}: [{}] {}",
        finding.violation.tag(),
        finding.violation
    )
}

/// 1-based line and column (in characters) of the span start.
fn line_column(code: &str, span: Span) -> (usize, usize) {
    let before = code.get(..span.start).unwrap_or(code);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
