//! # rule-enforcer-core
//!
//! Core framework for checking exercise submissions against a rules document.
//!
//! This crate provides the foundational types shared by the detectors and the
//! engine:
//!
//! - [`Rules`] - the policy document (which constraints are active)
//! - [`RuleViolation`] - the closed set of violations, one variant per constraint
//! - [`Writer`] - the collect-all accumulator used to sequence checks
//! - [`SyntaxTree`] - an immutable arena over the tree-sitter TypeScript tree
//! - [`Detector`] trait for pure `(tree, rules) -> findings` checks
//!
//! ## Example
//!
//! ```ignore
//! use rule_enforcer_core::{Rules, SyntaxTree};
//!
//! let rules = Rules::from_json(r#"{ "disallow": ["loops"] }"#)?;
//! let tree = SyntaxTree::parse("while (true) {}")?;
//! for finding in MyDetector.detect(&tree, &rules) {
//!     println!("{}", finding.violation);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod detector;
mod rules;
mod tree;
mod violation;
mod writer;

pub use detector::{Detector, DetectorBox};
pub use rules::{DeclarationKind, Disallow, Rules, RulesError};
pub use tree::{NodeId, NodeKind, Operator, Span, SyntaxNode, SyntaxTree, TreeError};
pub use violation::{Finding, RuleViolation, ViolationDiagnostic};
pub use writer::Writer;
