//! Detector forbidding `if` statements.
//!
//! Each `else if` link is its own `if` statement and is reported
//! separately. Conditional expressions (`a ? b : c`) are allowed.

use rule_enforcer_core::{Detector, Disallow, Finding, NodeKind, RuleViolation, Rules, SyntaxTree};

/// Detector code for no-if-statements.
pub const CODE: &str = "RE005";

/// Detector name for no-if-statements.
pub const NAME: &str = "no-if-statements";

/// Reports every `if` statement.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIfStatements;

impl NoIfStatements {
    /// Creates the detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Detector for NoIfStatements {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids if statements"
    }

    fn applies(&self, rules: &Rules) -> bool {
        rules.disallows(Disallow::IfStatements)
    }

    fn detect(&self, tree: &SyntaxTree<'_>, rules: &Rules) -> Vec<Finding> {
        if !self.applies(rules) {
            return Vec::new();
        }

        tree.nodes()
            .filter(|&id| tree.kind(id) == NodeKind::IfStatement)
            .map(|id| {
                Finding::at(
                    RuleViolation::DisallowedIfStatements {
                        code: tree.text(id).to_string(),
                    },
                    tree.span(id),
                )
            })
            .collect()
    }
}
