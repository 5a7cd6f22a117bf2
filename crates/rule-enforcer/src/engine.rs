//! The engine sequencing every detector over one submission.

use rule_enforcer_core::{
    DetectorBox, Finding, RuleViolation, Rules, SyntaxTree, TreeError, Writer,
};
use rule_enforcer_rules::all_detectors;

/// Runs an ordered set of detectors against submissions.
///
/// The engine holds no per-submission state; the same engine can check any
/// number of submissions and returns identical results for identical input.
pub struct RuleEngine {
    detectors: Vec<DetectorBox>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "detectors",
                &self.detectors.iter().map(|d| d.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl RuleEngine {
    /// Creates an engine with every built-in detector, in report order.
    #[must_use]
    pub fn new() -> Self {
        Self::with_detectors(all_detectors())
    }

    /// Creates an engine running exactly `detectors`, in the given order.
    #[must_use]
    pub fn with_detectors(detectors: Vec<DetectorBox>) -> Self {
        Self { detectors }
    }

    /// The detectors this engine runs.
    #[must_use]
    pub fn detectors(&self) -> &[DetectorBox] {
        &self.detectors
    }

    /// Parses `code` and returns every finding, detector by detector.
    ///
    /// # Errors
    ///
    /// Returns an error if no syntax tree can be produced. Syntax errors in
    /// the submission are not errors; the recovered tree is checked.
    pub fn check(&self, code: &str, rules: &Rules) -> Result<Vec<Finding>, TreeError> {
        let tree = SyntaxTree::parse(code)?;
        Ok(self.check_tree(&tree, rules))
    }

    /// Runs every detector over an already parsed tree.
    #[must_use]
    pub fn check_tree(&self, tree: &SyntaxTree<'_>, rules: &Rules) -> Vec<Finding> {
        let steps = self.detectors.iter().map(|detector| {
            move |(): ()| {
                if !detector.applies(rules) {
                    tracing::debug!(detector = detector.name(), "skipped");
                    return Writer::success(());
                }
                let findings = detector.detect(tree, rules);
                tracing::debug!(
                    detector = detector.name(),
                    findings = findings.len(),
                    "detector finished"
                );
                Writer::new((), findings)
            }
        });

        let findings = Writer::fold((), steps).into_log();
        tracing::debug!(total = findings.len(), "submission checked");
        findings
    }

    /// Parses `code` and returns the violations without locations.
    ///
    /// # Errors
    ///
    /// See [`check`](Self::check).
    pub fn validate(&self, code: &str, rules: &Rules) -> Result<Vec<RuleViolation>, TreeError> {
        Ok(self
            .check(code, rules)?
            .into_iter()
            .map(RuleViolation::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rule_enforcer_core::Disallow;
    use rule_enforcer_rules::{NoConsole, NoLoops};

    #[test]
    fn default_engine_runs_every_detector() {
        let engine = RuleEngine::new();
        assert_eq!(engine.detectors().len(), 8);
        assert_eq!(engine.detectors()[0].name(), "expected-functions");
        assert_eq!(engine.detectors()[7].name(), "allowed-imports");
    }

    #[test]
    fn custom_detector_order_is_kept() {
        let engine = RuleEngine::with_detectors(vec![Box::new(NoConsole), Box::new(NoLoops)]);
        let rules = Rules::new().disallow([Disallow::Loops, Disallow::Console]);
        let code = "while (true) {}\nconsole.log(1)\n";
        let tags: Vec<&str> = engine
            .validate(code, &rules)
            .unwrap()
            .iter()
            .map(RuleViolation::tag)
            .collect();
        assert_eq!(tags, vec!["DisallowedConsole", "DisallowedLoops"]);
    }

    #[test]
    fn no_rules_no_violations() {
        let code = "var x = 1\nfor (;;) { x++ }\nconsole.log(x)\n";
        assert!(RuleEngine::new()
            .validate(code, &Rules::new())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn debug_lists_detector_names() {
        let engine = RuleEngine::with_detectors(vec![Box::new(NoLoops)]);
        assert_eq!(
            format!("{engine:?}"),
            "RuleEngine { detectors: [\"no-loops\"] }"
        );
    }
}
