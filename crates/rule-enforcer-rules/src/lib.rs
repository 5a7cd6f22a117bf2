//! # rule-enforcer-rules
//!
//! Built-in construct detectors for rule-enforcer.
//!
//! Each detector is a pure check over a parsed submission and is switched on
//! by one field of the rules document.
//!
//! ## Available Detectors
//!
//! | Code | Name | Active when |
//! |------|------|-------------|
//! | RE001 | `expected-functions` | `expectedFunctions` is non-empty |
//! | RE002 | `valid-declarations` | `validDeclarations` is present |
//! | RE003 | `no-reassignment` | `disallow` has `reassignment` |
//! | RE004 | `no-loops` | `disallow` has `loops` |
//! | RE005 | `no-if-statements` | `disallow` has `if-statements` |
//! | RE006 | `no-console` | `disallow` has `console` |
//! | RE007 | `no-helper-functions` | `expectedFunctions` is present and `disallow` has `helper-functions` |
//! | RE008 | `allowed-imports` | `allowedImports` is present |
//!
//! ## Usage
//!
//! ```ignore
//! use rule_enforcer_core::{Rules, SyntaxTree};
//! use rule_enforcer_rules::all_detectors;
//!
//! let tree = SyntaxTree::parse(code)?;
//! for detector in all_detectors() {
//!     findings.extend(detector.detect(&tree, &rules));
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod allowed_imports;
mod expected_functions;
mod functions;
mod import_pattern;
mod no_console;
mod no_helper_functions;
mod no_if_statements;
mod no_loops;
mod no_reassignment;
mod presets;
mod valid_declarations;

pub use allowed_imports::AllowedImportsDetector;
pub use expected_functions::ExpectedFunctions;
pub use import_pattern::{AllowedImports, ModuleParts};
pub use no_console::NoConsole;
pub use no_helper_functions::NoHelperFunctions;
pub use no_if_statements::NoIfStatements;
pub use no_loops::NoLoops;
pub use no_reassignment::NoReassignment;
pub use presets::{all_detectors, detector_by_name};
pub use valid_declarations::ValidDeclarations;

/// Re-export core types for convenience.
pub use rule_enforcer_core::{Detector, Finding, RuleViolation, Rules};
