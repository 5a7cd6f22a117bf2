//! Shared queries for locating function-like declarations.

use rule_enforcer_core::{NodeId, NodeKind, SyntaxTree};

/// Name of a function declaration or of a declarator initialised to a
/// function expression or arrow function.
///
/// Returns `None` for anything else, including anonymous functions and
/// destructuring declarators.
pub(crate) fn function_name<'src>(tree: &SyntaxTree<'src>, id: NodeId) -> Option<&'src str> {
    match tree.kind(id) {
        NodeKind::FunctionDeclaration => {
            let name = tree.child_by_field(id, "name")?;
            Some(tree.text(name))
        }
        NodeKind::VariableDeclarator if is_function_declarator(tree, id) => {
            let name = tree.child_by_field(id, "name")?;
            (tree.kind(name) == NodeKind::Identifier).then(|| tree.text(name))
        }
        _ => None,
    }
}

/// True for `name = function () {}` and `name = () => {}` declarators.
pub(crate) fn is_function_declarator(tree: &SyntaxTree<'_>, id: NodeId) -> bool {
    tree.kind(id) == NodeKind::VariableDeclarator
        && tree
            .child_by_field(id, "value")
            .is_some_and(|value| tree.kind(value).is_function_like())
}

/// Function-likes defined directly at the top level of the program.
///
/// Covers function declarations and function-valued declarators, bare or
/// wrapped in an `export` statement. Functions nested in other statements
/// are not top-level.
pub(crate) fn top_level_functions(tree: &SyntaxTree<'_>) -> Vec<NodeId> {
    let mut found = Vec::new();
    for &child in tree.children(tree.root()) {
        let item = if tree.kind(child) == NodeKind::ExportStatement {
            match tree.child_by_field(child, "declaration") {
                Some(declaration) => declaration,
                None => continue,
            }
        } else {
            child
        };

        match tree.kind(item) {
            NodeKind::FunctionDeclaration => found.push(item),
            kind if kind.is_declaration() => found.extend(
                tree.children(item)
                    .iter()
                    .copied()
                    .filter(|&d| is_function_declarator(tree, d)),
            ),
            _ => {}
        }
    }
    found
}
