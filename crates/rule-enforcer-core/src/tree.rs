//! Immutable syntax tree arena built from the tree-sitter TypeScript grammar.
//!
//! Detectors never see tree-sitter types. The concrete syntax tree is copied
//! once, in pre-order, into a flat arena of [`SyntaxNode`]s addressed by
//! [`NodeId`]. Each node keeps its children in source order and a non-owning
//! index back to its parent.

use crate::rules::DeclarationKind;
use tree_sitter::{Language, Parser, Tree};

/// Index of a node inside a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in pre-order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Byte range of a node in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// First byte (inclusive).
    pub start: usize,
    /// Last byte (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a span from a byte range.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(self) -> usize {
        self.end - self.start
    }

    /// True for zero-width spans.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// Assignment-family operator tokens.
///
/// Only operators the reassignment check cares about are modelled; anything
/// else (`===`, `**=`, ...) maps to [`NodeKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`
    Assign,
    /// `++`
    Increment,
    /// `--`
    Decrement,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
    /// `%=`
    RemAssign,
    /// `|=`
    BitOrAssign,
    /// `||=`
    OrAssign,
    /// `&=`
    BitAndAssign,
    /// `&&=`
    AndAssign,
    /// `^=`
    BitXorAssign,
    /// `??=`
    NullishAssign,
    /// `<<=`
    ShlAssign,
    /// `>>=`
    ShrAssign,
    /// `>>>=`
    UShrAssign,
}

impl Operator {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "=" => Self::Assign,
            "++" => Self::Increment,
            "--" => Self::Decrement,
            "+=" => Self::AddAssign,
            "-=" => Self::SubAssign,
            "*=" => Self::MulAssign,
            "/=" => Self::DivAssign,
            "%=" => Self::RemAssign,
            "|=" => Self::BitOrAssign,
            "||=" => Self::OrAssign,
            "&=" => Self::BitAndAssign,
            "&&=" => Self::AndAssign,
            "^=" => Self::BitXorAssign,
            "??=" => Self::NullishAssign,
            "<<=" => Self::ShlAssign,
            ">>=" => Self::ShrAssign,
            ">>>=" => Self::UShrAssign,
            _ => return None,
        })
    }

    /// `++` or `--`.
    #[must_use]
    pub fn is_update(self) -> bool {
        matches!(self, Self::Increment | Self::Decrement)
    }

    /// One of the compound assignment operators (`+=`, `??=`, ...).
    #[must_use]
    pub fn is_compound(self) -> bool {
        !matches!(self, Self::Assign | Self::Increment | Self::Decrement)
    }
}

/// Node categories the detectors distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The root `program` node.
    Program,
    /// `function f() {}` (including generator declarations).
    FunctionDeclaration,
    /// `function () {}` used as an expression.
    FunctionExpression,
    /// `() => {}`
    ArrowFunction,
    /// `const`/`let` declaration statement.
    LexicalDeclaration,
    /// `var` declaration statement.
    VariableDeclaration,
    /// One `name = value` entry of a declaration.
    VariableDeclarator,
    /// `export ...`
    ExportStatement,
    /// `import ... from "module"`
    ImportStatement,
    /// The bindings part of an import statement.
    ImportClause,
    /// `{ a, b as c }` inside an import clause.
    NamedImports,
    /// `a` or `b as c` inside named imports.
    ImportSpecifier,
    /// `* as ns` inside an import clause.
    NamespaceImport,
    /// A string literal, quotes included.
    StringLiteral,
    /// An identifier reference or binding (not a property name).
    ///
    /// Shorthand properties (`{ console }`, `const { log } = ...`) are both
    /// a key and a reference, and land here too.
    Identifier,
    /// `if (...) ...`
    IfStatement,
    /// `for (init; test; update) ...`
    ForStatement,
    /// `for (x of xs)` and `for (k in obj)`.
    ForInStatement,
    /// `while (...) ...`
    WhileStatement,
    /// `do ... while (...)`
    DoStatement,
    /// `target = value`
    AssignmentExpression,
    /// `target += value` and friends.
    AugmentedAssignmentExpression,
    /// `x++`, `--x`
    UpdateExpression,
    /// A `const`, `let` or `var` keyword token.
    DeclarationKeyword(DeclarationKind),
    /// An assignment-family operator token.
    Operator(Operator),
    /// A region the parser could not make sense of.
    Error,
    /// Anything else.
    Other,
}

impl NodeKind {
    /// Maps a tree-sitter grammar kind to a node category.
    ///
    /// `named` separates grammar rules from anonymous tokens that share a
    /// name, such as the `function` keyword or the `string` type keyword.
    #[must_use]
    pub fn from_grammar(kind: &str, named: bool) -> Self {
        if !named {
            return match kind {
                "const" => Self::DeclarationKeyword(DeclarationKind::Const),
                "let" => Self::DeclarationKeyword(DeclarationKind::Let),
                "var" => Self::DeclarationKeyword(DeclarationKind::Var),
                other => Operator::from_token(other).map_or(Self::Other, Self::Operator),
            };
        }
        match kind {
            "program" => Self::Program,
            "function_declaration" | "generator_function_declaration" => {
                Self::FunctionDeclaration
            }
            "function_expression" | "function" | "generator_function" => Self::FunctionExpression,
            "arrow_function" => Self::ArrowFunction,
            "lexical_declaration" => Self::LexicalDeclaration,
            "variable_declaration" => Self::VariableDeclaration,
            "variable_declarator" => Self::VariableDeclarator,
            "export_statement" => Self::ExportStatement,
            "import_statement" => Self::ImportStatement,
            "import_clause" => Self::ImportClause,
            "named_imports" => Self::NamedImports,
            "import_specifier" => Self::ImportSpecifier,
            "namespace_import" => Self::NamespaceImport,
            "string" => Self::StringLiteral,
            "identifier"
            | "shorthand_property_identifier"
            | "shorthand_property_identifier_pattern" => Self::Identifier,
            "if_statement" => Self::IfStatement,
            "for_statement" => Self::ForStatement,
            "for_in_statement" => Self::ForInStatement,
            "while_statement" => Self::WhileStatement,
            "do_statement" => Self::DoStatement,
            "assignment_expression" => Self::AssignmentExpression,
            "augmented_assignment_expression" => Self::AugmentedAssignmentExpression,
            "update_expression" => Self::UpdateExpression,
            "ERROR" => Self::Error,
            _ => Self::Other,
        }
    }

    /// Function declarations and function-valued expressions.
    #[must_use]
    pub fn is_function_like(self) -> bool {
        matches!(
            self,
            Self::FunctionDeclaration | Self::FunctionExpression | Self::ArrowFunction
        )
    }

    /// Any loop statement node.
    ///
    /// `ForInStatement` covers both `for..in` and `for..of`; tell them apart
    /// by the `operator` child.
    #[must_use]
    pub fn is_loop(self) -> bool {
        matches!(
            self,
            Self::ForStatement | Self::ForInStatement | Self::WhileStatement | Self::DoStatement
        )
    }

    /// `const`/`let` or `var` declaration statements.
    #[must_use]
    pub fn is_declaration(self) -> bool {
        matches!(self, Self::LexicalDeclaration | Self::VariableDeclaration)
    }
}

/// One node of the arena.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    /// Node category.
    pub kind: NodeKind,
    /// Grammar field this node occupies in its parent (`name`, `value`, ...).
    pub field: Option<&'static str>,
    /// Byte range in the source.
    pub span: Span,
    /// Parent node; `None` only for the root.
    pub parent: Option<NodeId>,
    /// Children in source order.
    pub children: Vec<NodeId>,
}

/// Errors raised while building a [`SyntaxTree`].
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The TypeScript grammar could not be loaded into the parser.
    #[error("failed to load TypeScript grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The parser produced no tree at all.
    #[error("parser produced no syntax tree")]
    Parse,
}

/// A parsed submission.
///
/// The tree borrows the source text it was parsed from and is never mutated
/// after construction.
#[derive(Debug, Clone)]
pub struct SyntaxTree<'src> {
    source: &'src str,
    nodes: Vec<SyntaxNode>,
    has_errors: bool,
}

impl<'src> SyntaxTree<'src> {
    /// Parses `source` with the TypeScript grammar.
    ///
    /// Syntax errors do not fail the parse: tree-sitter recovers and the
    /// damaged region becomes [`NodeKind::Error`] nodes (see
    /// [`has_errors`](Self::has_errors)).
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or no tree is produced.
    pub fn parse(source: &'src str) -> Result<Self, TreeError> {
        let language: Language = tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into();
        let mut parser = Parser::new();
        parser.set_language(&language)?;

        let tree = parser.parse(source, None).ok_or(TreeError::Parse)?;
        let has_errors = tree.root_node().has_error();
        if has_errors {
            tracing::debug!("submission has syntax errors; checking the recovered tree");
        }

        Ok(Self {
            source,
            nodes: Self::copy_nodes(&tree),
            has_errors,
        })
    }

    /// Walks the tree-sitter tree in pre-order and copies every node that
    /// exists in the source. Zero-width "missing" nodes inserted by error
    /// recovery are skipped.
    fn copy_nodes(tree: &Tree) -> Vec<SyntaxNode> {
        let mut nodes: Vec<SyntaxNode> = Vec::new();
        let mut ancestors: Vec<NodeId> = Vec::new();
        let mut cursor = tree.walk();

        loop {
            let node = cursor.node();
            let mut pushed = None;

            if !node.is_missing() {
                let id = NodeId(nodes.len());
                let parent = ancestors.last().copied();
                nodes.push(SyntaxNode {
                    kind: NodeKind::from_grammar(node.kind(), node.is_named()),
                    field: cursor.field_name(),
                    span: Span::new(node.start_byte(), node.end_byte()),
                    parent,
                    children: Vec::new(),
                });
                if let Some(parent) = parent {
                    nodes[parent.0].children.push(id);
                }
                pushed = Some(id);
            }

            if let Some(id) = pushed {
                if cursor.goto_first_child() {
                    ancestors.push(id);
                    continue;
                }
            }

            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return nodes;
                }
                ancestors.pop();
            }
        }
    }

    /// The source text this tree was parsed from.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// True if the parser had to recover from syntax errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// The `program` node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Full node record.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0]
    }

    /// Kind tag of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    /// Exact source slice covered by a node.
    #[must_use]
    pub fn text(&self, id: NodeId) -> &'src str {
        let span = self.nodes[id.0].span;
        self.source.get(span.start..span.end).unwrap_or("")
    }

    /// Byte span of a node.
    #[must_use]
    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.0].span
    }

    /// Children of a node, in source order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Parent of a node; `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Grammar field name the node occupies in its parent.
    #[must_use]
    pub fn field(&self, id: NodeId) -> Option<&'static str> {
        self.nodes[id.0].field
    }

    /// First child stored under the grammar field `name`.
    #[must_use]
    pub fn child_by_field(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| self.field(child) == Some(name))
    }

    /// Every node, in pre-order (document order).
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// `id` and all nodes below it, in pre-order.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![id];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(self.children(next).iter().rev().copied());
            Some(next)
        })
    }

    /// Parent, grandparent, ... up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&n| self.parent(n))
    }
}
