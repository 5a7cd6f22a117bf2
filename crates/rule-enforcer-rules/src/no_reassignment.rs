//! Detector forbidding reassignment.
//!
//! # Detected Patterns
//!
//! - `x++`, `--x` and every other update expression
//! - compound assignments: `+=`, `-=`, `*=`, `/=`, `%=`, `|=`, `||=`, `&=`,
//!   `&&=`, `^=`, `??=`, `<<=`, `>>=`, `>>>=`
//! - plain `=` assignments outside declarations (`x = 2`, `obj.prop = 2`)
//!
//! Initialisers (`const x = 2`), default parameters and type aliases are
//! not assignments. Operators are matched by token kind, so `==` and `===`
//! never match.

use rule_enforcer_core::{
    Detector, Disallow, Finding, NodeId, NodeKind, Operator, RuleViolation, Rules, SyntaxTree,
};

/// Detector code for no-reassignment.
pub const CODE: &str = "RE003";

/// Detector name for no-reassignment.
pub const NAME: &str = "no-reassignment";

/// Reports every reassigning operator.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReassignment;

impl NoReassignment {
    /// Creates the detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Detector for NoReassignment {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids assignments, compound assignments and ++/-- after declaration"
    }

    fn applies(&self, rules: &Rules) -> bool {
        rules.disallows(Disallow::Reassignment)
    }

    fn detect(&self, tree: &SyntaxTree<'_>, rules: &Rules) -> Vec<Finding> {
        if !self.applies(rules) {
            return Vec::new();
        }

        tree.nodes()
            .filter(|&id| is_reassigning(tree, id))
            .filter_map(|op| {
                let expr = tree.parent(op)?;
                Some(Finding::at(
                    RuleViolation::DisallowedReassignment {
                        code: tree.text(expr).to_string(),
                    },
                    tree.span(expr),
                ))
            })
            .collect()
    }
}

fn is_reassigning(tree: &SyntaxTree<'_>, id: NodeId) -> bool {
    match tree.kind(id) {
        NodeKind::Operator(Operator::Assign) => tree
            .parent(id)
            .is_some_and(|p| tree.kind(p) == NodeKind::AssignmentExpression),
        NodeKind::Operator(op) => op.is_update() || op.is_compound(),
        _ => false,
    }
}
