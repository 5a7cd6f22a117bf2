//! Detector restricting declaration keywords to `validDeclarations`.
//!
//! Each `const`, `let` or `var` keyword is counted once, so
//! `let a = 1, b = 2` is a single occurrence. Keywords in `for..of` and
//! `for..in` headers count as declarations too.
//!
//! Findings are grouped by kind (`const`, then `let`, then `var`) and keep
//! document order inside each group.

use rule_enforcer_core::{
    DeclarationKind, Detector, Finding, NodeId, NodeKind, RuleViolation, Rules, Span, SyntaxTree,
    Writer,
};

/// Detector code for valid-declarations.
pub const CODE: &str = "RE002";

/// Detector name for valid-declarations.
pub const NAME: &str = "valid-declarations";

/// Reports declarations whose keyword is not allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidDeclarations;

impl ValidDeclarations {
    /// Creates the detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Detector for ValidDeclarations {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids const/let/var declarations not listed in validDeclarations"
    }

    fn applies(&self, rules: &Rules) -> bool {
        rules.valid_declarations.is_some()
    }

    fn detect(&self, tree: &SyntaxTree<'_>, rules: &Rules) -> Vec<Finding> {
        if !self.applies(rules) {
            return Vec::new();
        }

        let keywords: Vec<(DeclarationKind, NodeId)> = tree
            .nodes()
            .filter_map(|id| match tree.kind(id) {
                NodeKind::DeclarationKeyword(kind) if belongs_to_declaration(tree, id) => {
                    Some((kind, id))
                }
                _ => None,
            })
            .collect();

        let steps = DeclarationKind::ALL.map(|kind| {
            let keywords = &keywords;
            move |(): ()| {
                if rules.allows_declaration(kind) {
                    Writer::success(())
                } else {
                    Writer::new((), absent_kind(tree, keywords, kind))
                }
            }
        });

        Writer::fold((), steps).into_log()
    }
}

/// Findings for every keyword of `kind`.
fn absent_kind(
    tree: &SyntaxTree<'_>,
    keywords: &[(DeclarationKind, NodeId)],
    kind: DeclarationKind,
) -> Vec<Finding> {
    keywords
        .iter()
        .filter(|(k, _)| *k == kind)
        .map(|&(_, keyword)| {
            let span = declaration_span(tree, keyword);
            let code = tree.source().get(span.start..span.end).unwrap_or_default();
            Finding::at(
                RuleViolation::DisallowedDeclarations {
                    disallowed: kind,
                    code: code.to_string(),
                },
                span,
            )
        })
        .collect()
}

/// `const` also appears in `as const` and `const enum`; only declaration
/// heads are counted.
fn belongs_to_declaration(tree: &SyntaxTree<'_>, keyword: NodeId) -> bool {
    tree.parent(keyword).is_some_and(|parent| {
        let kind = tree.kind(parent);
        kind.is_declaration() || kind == NodeKind::ForInStatement
    })
}

/// From the keyword to the end of the last declared binding.
///
/// Trailing semicolons are left out, and in a loop header only the
/// binding part (`const x`) is taken.
fn declaration_span(tree: &SyntaxTree<'_>, keyword: NodeId) -> Span {
    let start = tree.span(keyword).start;
    let Some(parent) = tree.parent(keyword) else {
        return tree.span(keyword);
    };

    let last = if tree.kind(parent) == NodeKind::ForInStatement {
        tree.child_by_field(parent, "left")
    } else {
        tree.children(parent)
            .iter()
            .rev()
            .copied()
            .find(|&c| tree.kind(c) == NodeKind::VariableDeclarator)
    };

    let end = last.map_or(tree.span(parent).end, |node| tree.span(node).end);
    Span::new(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_code(code: &str, valid: &[DeclarationKind]) -> Vec<RuleViolation> {
        let tree = SyntaxTree::parse(code).expect("Failed to parse");
        let rules = Rules::new().valid_declarations(valid.iter().copied());
        ValidDeclarations::new()
            .detect(&tree, &rules)
            .into_iter()
            .map(|f| f.violation)
            .collect()
    }

    fn count(violations: &[RuleViolation], kind: DeclarationKind) -> usize {
        violations
            .iter()
            .filter(|v| {
                matches!(v, RuleViolation::DisallowedDeclarations { disallowed, .. } if *disallowed == kind)
            })
            .count()
    }

    const MIXED: &str = r"
const a = 1
const b = 2
const c = 3
let d = 4
var e = 5
var f = 6
";

    #[test]
    fn test_only_unlisted_kinds_are_reported() {
        let violations = check_code(MIXED, &[DeclarationKind::Const, DeclarationKind::Let]);
        assert_eq!(count(&violations, DeclarationKind::Const), 0);
        assert_eq!(count(&violations, DeclarationKind::Let), 0);
        assert_eq!(count(&violations, DeclarationKind::Var), 2);
    }

    #[test]
    fn test_absent_list_reports_nothing() {
        let tree = SyntaxTree::parse(MIXED).expect("Failed to parse");
        assert!(ValidDeclarations.detect(&tree, &Rules::new()).is_empty());
    }

    #[test]
    fn test_empty_list_reports_everything_grouped_by_kind() {
        let code = "var x = 1\nlet y = 2\nconst z = 3\nvar w = 4\n";
        let kinds: Vec<DeclarationKind> = check_code(code, &[])
            .into_iter()
            .filter_map(|v| match v {
                RuleViolation::DisallowedDeclarations { disallowed, .. } => Some(disallowed),
                _ => None,
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                DeclarationKind::Const,
                DeclarationKind::Let,
                DeclarationKind::Var,
                DeclarationKind::Var,
            ]
        );
    }

    #[test]
    fn test_counts_keywords_not_names() {
        let violations = check_code("let x = 1, y = 2;\n", &[DeclarationKind::Const]);
        assert_eq!(
            violations,
            vec![RuleViolation::DisallowedDeclarations {
                disallowed: DeclarationKind::Let,
                code: "let x = 1, y = 2".to_string(),
            }]
        );
    }

    #[test]
    fn test_loop_headers_are_declarations() {
        let violations = check_code(
            "for (let item of items) { use(item) }\n",
            &[DeclarationKind::Const],
        );
        assert_eq!(
            violations,
            vec![RuleViolation::DisallowedDeclarations {
                disallowed: DeclarationKind::Let,
                code: "let item".to_string(),
            }]
        );
    }

    #[test]
    fn test_as_const_is_not_a_declaration() {
        let violations = check_code("let xs = [1, 2] as const\n", &[DeclarationKind::Let]);
        assert!(violations.is_empty());
    }
}
