//! Detector forbidding use of `console`.
//!
//! Any identifier spelled `console` is reported, not only calls through
//! it. Shorthand properties (`{ console }`) reference the global and are
//! reported too. Property names such as `logger.console` are not
//! identifiers and pass.

use rule_enforcer_core::{Detector, Disallow, Finding, NodeKind, RuleViolation, Rules, SyntaxTree};

/// Detector code for no-console.
pub const CODE: &str = "RE006";

/// Detector name for no-console.
pub const NAME: &str = "no-console";

/// Reports references to the `console` global.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConsole;

impl NoConsole {
    /// Creates the detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Detector for NoConsole {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids references to console"
    }

    fn applies(&self, rules: &Rules) -> bool {
        rules.disallows(Disallow::Console)
    }

    fn detect(&self, tree: &SyntaxTree<'_>, rules: &Rules) -> Vec<Finding> {
        if !self.applies(rules) {
            return Vec::new();
        }

        tree.nodes()
            .filter(|&id| tree.kind(id) == NodeKind::Identifier && tree.text(id) == "console")
            .map(|id| {
                let context = tree.parent(id).unwrap_or(id);
                Finding::at(
                    RuleViolation::DisallowedConsole {
                        code: tree.text(context).to_string(),
                    },
                    tree.span(id),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_code(code: &str) -> Vec<RuleViolation> {
        let tree = SyntaxTree::parse(code).expect("Failed to parse");
        NoConsole::new()
            .detect(&tree, &Rules::new().disallow([Disallow::Console]))
            .into_iter()
            .map(|f| f.violation)
            .collect()
    }

    #[test]
    fn test_console_call() {
        let violations = check_code("console.log(\"hi\")\n");
        assert_eq!(
            violations,
            vec![RuleViolation::DisallowedConsole {
                code: "console.log".to_string()
            }]
        );
    }

    #[test]
    fn test_aliasing_console_is_reported() {
        let violations = check_code("const c = console\nc.log(1)\n");
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_shorthand_property_is_reported() {
        let violations = check_code("const o = { console }\n");
        assert_eq!(
            violations,
            vec![RuleViolation::DisallowedConsole {
                code: "{ console }".to_string()
            }]
        );
    }

    #[test]
    fn test_shorthand_through_property_access_counts_once() {
        assert_eq!(check_code("({ console }).console.log(1)\n").len(), 1);
    }

    #[test]
    fn test_destructured_console_is_reported() {
        let violations = check_code("const { console } = globalThis\n");
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_property_named_console_is_allowed() {
        assert!(check_code("const logger = { console: 1 }\nlogger.console\n").is_empty());
    }
}
