//! Detector restricting imports to the `allowedImports` allow-list.
//!
//! See [`AllowedImports`] for the pattern language. For a module restricted
//! to named parts, every bound name of the import must be allowed:
//!
//! - `import { a, b as c } from "m"` checks `a` and `b` (never the alias)
//! - `import d from "m"` checks `d`
//! - `import * as ns from "m"` checks `ns`
//!
//! A statement yields at most one violation however many names fail.
//! `import x = require("m")` is not an import statement here.

use crate::import_pattern::AllowedImports;
use rule_enforcer_core::{Detector, Finding, NodeId, NodeKind, RuleViolation, Rules, SyntaxTree};

/// Detector code for allowed-imports.
pub const CODE: &str = "RE008";

/// Detector name for allowed-imports.
pub const NAME: &str = "allowed-imports";

/// Reports imports missing from the allow-list.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowedImportsDetector;

impl AllowedImportsDetector {
    /// Creates the detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Detector for AllowedImportsDetector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids imports of modules or names not in allowedImports"
    }

    fn applies(&self, rules: &Rules) -> bool {
        rules.allowed_imports.is_some()
    }

    fn detect(&self, tree: &SyntaxTree<'_>, rules: &Rules) -> Vec<Finding> {
        let Some(patterns) = rules.allowed_imports.as_deref() else {
            return Vec::new();
        };
        let allowed = AllowedImports::from_patterns(patterns);

        tree.nodes()
            .filter(|&id| tree.kind(id) == NodeKind::ImportStatement)
            .filter_map(|stmt| {
                let source = tree.child_by_field(stmt, "source")?;
                let module = strip_quotes(tree.text(source));
                if allowed.allows(module, bound_names(tree, stmt)) {
                    return None;
                }
                tracing::debug!(module, "import not in allow-list");
                Some(Finding::at(
                    RuleViolation::DisallowedImport {
                        name: module.to_string(),
                        code: tree.text(stmt).to_string(),
                    },
                    tree.span(stmt),
                ))
            })
            .collect()
    }
}

fn strip_quotes(literal: &str) -> &str {
    literal.trim_matches(|c| c == '"' || c == '\'')
}

/// Names an import statement binds, by exported name for specifiers and by
/// local name for default and namespace imports.
fn bound_names<'src>(tree: &SyntaxTree<'src>, stmt: NodeId) -> Vec<&'src str> {
    let Some(clause) = tree
        .children(stmt)
        .iter()
        .copied()
        .find(|&c| tree.kind(c) == NodeKind::ImportClause)
    else {
        return Vec::new();
    };

    tree.descendants(clause)
        .filter(|&id| tree.kind(id) == NodeKind::Identifier)
        .filter(|&id| {
            let in_specifier = tree
                .parent(id)
                .is_some_and(|p| tree.kind(p) == NodeKind::ImportSpecifier);
            !in_specifier || tree.field(id) == Some("name")
        })
        .map(|id| tree.text(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_code(code: &str, allowed: &[&str]) -> Vec<RuleViolation> {
        let tree = SyntaxTree::parse(code).expect("Failed to parse");
        let rules = Rules::new().allowed_imports(allowed.iter().copied());
        AllowedImportsDetector::new()
            .detect(&tree, &rules)
            .into_iter()
            .map(|f| f.violation)
            .collect()
    }

    #[test]
    fn test_empty_list_disallows_every_import() {
        let code = "import fs from \"fs\"\nimport { pipe } from 'effect'\n";
        let violations = check_code(code, &[]);
        assert_eq!(
            violations,
            vec![
                RuleViolation::DisallowedImport {
                    name: "fs".into(),
                    code: "import fs from \"fs\"".into(),
                },
                RuleViolation::DisallowedImport {
                    name: "effect".into(),
                    code: "import { pipe } from 'effect'".into(),
                },
            ]
        );
    }

    #[test]
    fn test_star_allows_everything() {
        let code = "import fs from \"fs\"\nimport * as path from \"path\"\n";
        assert!(check_code(code, &["*"]).is_empty());
    }

    #[test]
    fn test_alias_is_checked_by_original_name() {
        let code = "import { pipe as p } from \"effect\"\n";
        assert!(check_code(code, &["effect.pipe"]).is_empty());
        assert_eq!(check_code(code, &["effect.p"]).len(), 1);
    }

    #[test]
    fn test_one_violation_per_statement() {
        let code = "import { Option, Either, pipe } from \"effect\"\n";
        let violations = check_code(code, &["effect.pipe"]);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_default_and_namespace_use_local_name() {
        assert!(check_code("import effect from \"effect\"\n", &["effect.effect"]).is_empty());
        assert!(check_code("import * as E from \"effect\"\n", &["effect.E"]).is_empty());
        assert_eq!(
            check_code("import * as E from \"effect\"\n", &["effect.pipe"]).len(),
            1
        );
    }

    #[test]
    fn test_whole_module_pattern() {
        let code = "import { Option, pipe } from \"effect\"\nimport fs from \"fs\"\n";
        let violations = check_code(code, &["effect"]);
        assert_eq!(
            violations,
            vec![RuleViolation::DisallowedImport {
                name: "fs".into(),
                code: "import fs from \"fs\"".into(),
            }]
        );
    }

    #[test]
    fn test_absent_list_reports_nothing() {
        let tree = SyntaxTree::parse("import fs from \"fs\"\n").expect("Failed to parse");
        assert!(AllowedImportsDetector.detect(&tree, &Rules::new()).is_empty());
    }
}
