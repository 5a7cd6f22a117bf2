//! Detector forbidding loop statements.
//!
//! # Detected Patterns
//!
//! - `for (...;...;...)` and `for (... of ...)`
//! - `while (...)` and `do ... while (...)`
//!
//! Loops are reported at any depth, nested loops included.
//!
//! # Good Patterns
//!
//! ```text
//! for (const key in obj) {}   // key enumeration is not reported
//! xs.forEach((x) => use(x))
//! ```

use rule_enforcer_core::{
    Detector, Disallow, Finding, NodeId, NodeKind, RuleViolation, Rules, SyntaxTree,
};

/// Detector code for no-loops.
pub const CODE: &str = "RE004";

/// Detector name for no-loops.
pub const NAME: &str = "no-loops";

/// Reports every loop statement.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLoops;

impl NoLoops {
    /// Creates the detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Detector for NoLoops {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids for, for..of, while and do..while loops"
    }

    fn applies(&self, rules: &Rules) -> bool {
        rules.disallows(Disallow::Loops)
    }

    fn detect(&self, tree: &SyntaxTree<'_>, rules: &Rules) -> Vec<Finding> {
        if !self.applies(rules) {
            return Vec::new();
        }

        tree.nodes()
            .filter(|&id| is_reported_loop(tree, id))
            .map(|id| {
                Finding::at(
                    RuleViolation::DisallowedLoops {
                        code: tree.text(id).to_string(),
                    },
                    tree.span(id),
                )
            })
            .collect()
    }
}

/// `for..of` and `for..in` share one grammar node; only the `of` form counts.
fn is_reported_loop(tree: &SyntaxTree<'_>, id: NodeId) -> bool {
    match tree.kind(id) {
        NodeKind::ForInStatement => iterates_values(tree, id),
        kind => kind.is_loop(),
    }
}

/// True when the header operator is the `of` keyword.
///
/// A binding named `of` is an identifier, so `for (const of in obj)` stays
/// a `for..in`.
fn iterates_values(tree: &SyntaxTree<'_>, id: NodeId) -> bool {
    if let Some(op) = tree.child_by_field(id, "operator") {
        return tree.text(op) == "of";
    }
    tree.children(id)
        .iter()
        .any(|&c| tree.kind(c) == NodeKind::Other && tree.text(c) == "of")
}
