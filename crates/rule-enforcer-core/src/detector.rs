//! Detector trait for construct checks.

use crate::rules::Rules;
use crate::tree::SyntaxTree;
use crate::violation::Finding;

/// A pure check over a parsed submission.
///
/// Detectors must not depend on each other or on evaluation order, and must
/// return the same findings for the same `(tree, rules)` input.
///
/// # Example
///
/// ```ignore
/// use rule_enforcer_core::{Detector, Finding, Rules, RuleViolation, SyntaxTree};
///
/// pub struct NoDebugger;
///
/// impl Detector for NoDebugger {
///     fn name(&self) -> &'static str { "no-debugger" }
///     fn code(&self) -> &'static str { "RE100" }
///
///     fn detect(&self, tree: &SyntaxTree<'_>, rules: &Rules) -> Vec<Finding> {
///         vec![]
///     }
/// }
/// ```
pub trait Detector: Send + Sync {
    /// Returns the kebab-case name of this detector (e.g., "loops").
    fn name(&self) -> &'static str;

    /// Returns the detector code (e.g., "RE004").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this detector checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Whether the rules document activates this detector.
    ///
    /// Inactive detectors are skipped; `detect` on an inactive detector
    /// returns nothing either way.
    fn applies(&self, rules: &Rules) -> bool;

    /// Scans the tree and returns findings in document order.
    fn detect(&self, tree: &SyntaxTree<'_>, rules: &Rules) -> Vec<Finding>;
}

/// Type alias for boxed Detector trait objects.
pub type DetectorBox = Box<dyn Detector>;
