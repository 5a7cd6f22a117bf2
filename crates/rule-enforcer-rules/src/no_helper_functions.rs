//! Detector forbidding functions other than the expected ones.
//!
//! Active only when `expectedFunctions` is present and `disallow` contains
//! `helper-functions`. Unlike the expected-functions check this looks at
//! every depth: a helper nested inside an expected function is reported.
//!
//! Anonymous callbacks (`xs.map((x) => x + 1)`) have no name and are never
//! helpers.

use crate::functions::function_name;
use rule_enforcer_core::{Detector, Disallow, Finding, RuleViolation, Rules, SyntaxTree};

/// Detector code for no-helper-functions.
pub const CODE: &str = "RE007";

/// Detector name for no-helper-functions.
pub const NAME: &str = "no-helper-functions";

/// Reports named functions that are not in `expectedFunctions`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHelperFunctions;

impl NoHelperFunctions {
    /// Creates the detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Detector for NoHelperFunctions {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids named functions not listed in expectedFunctions"
    }

    fn applies(&self, rules: &Rules) -> bool {
        rules.expected_functions.is_some() && rules.disallows(Disallow::HelperFunctions)
    }

    fn detect(&self, tree: &SyntaxTree<'_>, rules: &Rules) -> Vec<Finding> {
        if !self.applies(rules) {
            return Vec::new();
        }

        tree.nodes()
            .filter(|&id| function_name(tree, id).is_some_and(|name| !rules.expects_function(name)))
            .map(|id| {
                Finding::at(
                    RuleViolation::DisallowedHelperFunctions {
                        code: tree.text(id).to_string(),
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

    fn check_code(code: &str, expected: &[&str]) -> Vec<String> {
        let tree = SyntaxTree::parse(code).expect("Failed to parse");
        let rules = Rules::new()
            .expected_functions(expected.iter().copied())
            .disallow([Disallow::HelperFunctions]);
        NoHelperFunctions::new()
            .detect(&tree, &rules)
            .into_iter()
            .filter_map(|f| f.violation.code().map(String::from))
            .collect()
    }

    #[test]
    fn test_top_level_helper() {
        let code = r"
function f(x: number) { return double(x) }
function double(x: number) { return x * 2 }
";
        let violations = check_code(code, &["f"]);
        assert_eq!(violations, vec!["function double(x: number) { return x * 2 }"]);
    }

    #[test]
    fn test_nested_helper_inside_expected_function() {
        let code = r"
const f = (x: number) => {
  const inc = (y: number) => y + 1
  return inc(x)
}
";
        let violations = check_code(code, &["f"]);
        assert_eq!(violations, vec!["inc = (y: number) => y + 1"]);
    }

    #[test]
    fn test_anonymous_callbacks_are_not_helpers() {
        let code = "function f(xs: number[]) { return xs.map((x) => x + 1) }\n";
        assert!(check_code(code, &["f"]).is_empty());
    }

    #[test]
    fn test_requires_expected_functions() {
        let tree = SyntaxTree::parse("function g() {}\n").expect("Failed to parse");
        let rules = Rules::new().disallow([Disallow::HelperFunctions]);
        assert!(!NoHelperFunctions.applies(&rules));
        assert!(NoHelperFunctions.detect(&tree, &rules).is_empty());
    }

    #[test]
    fn test_empty_expected_list_makes_every_function_a_helper() {
        let violations = check_code("function g() {}\nconst h = () => 1\n", &[]);
        assert_eq!(violations.len(), 2);
    }
}
