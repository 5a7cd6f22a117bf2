//! Detector requiring named top-level functions.
//!
//! # Detected Patterns
//!
//! - A name listed in `expectedFunctions` with no top-level function of that
//!   name. All missing names are reported together in one violation.
//!
//! # Good Patterns
//!
//! ```text
//! // expectedFunctions: ["f"]
//! function f(x: number) { return x * 2 }
//! export const f = (x: number) => x * 2
//! ```

use crate::functions::{function_name, top_level_functions};
use rule_enforcer_core::{Detector, Finding, RuleViolation, Rules, SyntaxTree};

/// Detector code for expected-functions.
pub const CODE: &str = "RE001";

/// Detector name for expected-functions.
pub const NAME: &str = "expected-functions";

/// Reports expected functions missing from the top level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpectedFunctions;

impl ExpectedFunctions {
    /// Creates the detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Detector for ExpectedFunctions {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires every expected function to be defined at the top level"
    }

    fn applies(&self, rules: &Rules) -> bool {
        rules
            .expected_functions
            .as_ref()
            .is_some_and(|names| !names.is_empty())
    }

    /// At most one finding, listing the missing names in `expectedFunctions`
    /// order. A name listed more than once is reported once.
    fn detect(&self, tree: &SyntaxTree<'_>, rules: &Rules) -> Vec<Finding> {
        let Some(expected) = rules.expected_functions.as_deref() else {
            return Vec::new();
        };

        let found: Vec<&str> = top_level_functions(tree)
            .into_iter()
            .filter_map(|id| function_name(tree, id))
            .collect();

        let mut missing: Vec<String> = Vec::new();
        for name in expected {
            if !found.contains(&name.as_str()) && !missing.contains(name) {
                missing.push(name.clone());
            }
        }

        RuleViolation::missing_expected_functions(missing)
            .map(Finding::whole_file)
            .into_iter()
            .collect()
    }
}
