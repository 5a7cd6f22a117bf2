//! # rule-enforcer
//!
//! Checks exercise submissions written in TypeScript or JavaScript against a
//! rules document describing required and forbidden constructs.
//!
//! This is the facade crate: it re-exports the core types and the built-in
//! detectors, and provides the [`RuleEngine`] that runs them.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rule_enforcer::{validate, Rules};
//!
//! let rules = Rules::from_json(r#"{
//!     "expectedFunctions": ["f"],
//!     "disallow": ["loops", "console"]
//! }"#)?;
//!
//! for violation in validate("function f() { console.log(1) }", &rules)? {
//!     println!("{violation}");
//! }
//! ```
//!
//! ## Report Order
//!
//! Violations come back grouped by detector, in the fixed order listed by
//! [`rules::all_detectors`], and in document order within each detector.

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use rule_enforcer_core::*;

/// Built-in detectors and the import allow-list.
pub mod rules {
    pub use rule_enforcer_rules::*;
}

mod engine;

pub use engine::RuleEngine;

/// Checks `code` against `rules` with every built-in detector.
///
/// # Errors
///
/// Returns an error only if the parser produces no syntax tree.
pub fn validate(code: &str, rules: &Rules) -> Result<Vec<RuleViolation>, TreeError> {
    RuleEngine::new().validate(code, rules)
}
