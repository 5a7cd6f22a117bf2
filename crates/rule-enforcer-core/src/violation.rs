//! Violation model: one tagged variant per constraint kind.

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};

use crate::rules::DeclarationKind;
use crate::tree::Span;

/// Evidence that one rule of the rules document was broken.
///
/// Serializes as `{"_tag": "<Variant>", ...fields}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_tag")]
pub enum RuleViolation {
    /// One or more expected top-level functions are not defined.
    MissingExpectedFunction {
        /// Missing names, in `expectedFunctions` order. Never empty.
        missing: Vec<String>,
    },
    /// A declaration uses a keyword not listed in `validDeclarations`.
    DisallowedDeclarations {
        /// The offending keyword.
        disallowed: DeclarationKind,
        /// Source text of the enclosing declaration.
        code: String,
    },
    /// A variable or property is assigned after its declaration.
    DisallowedReassignment {
        /// Source text of the offending expression.
        code: String,
    },
    /// A loop statement.
    DisallowedLoops {
        /// Source text of the loop.
        code: String,
    },
    /// An `if` statement.
    DisallowedIfStatements {
        /// Source text of the statement.
        code: String,
    },
    /// An import of a module, or module part, not on the allow-list.
    DisallowedImport {
        /// Imported module name, without quotes.
        name: String,
        /// Source text of the whole import statement.
        code: String,
    },
    /// A reference to `console`.
    DisallowedConsole {
        /// Source text around the reference.
        code: String,
    },
    /// A function whose name is not in `expectedFunctions`.
    DisallowedHelperFunctions {
        /// Source text of the function.
        code: String,
    },
}

impl RuleViolation {
    /// Builds a [`RuleViolation::MissingExpectedFunction`], or `None` when
    /// nothing is missing.
    #[must_use]
    pub fn missing_expected_functions(missing: Vec<String>) -> Option<Self> {
        if missing.is_empty() {
            None
        } else {
            Some(Self::MissingExpectedFunction { missing })
        }
    }

    /// The `_tag` this violation serializes with.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::MissingExpectedFunction { .. } => "MissingExpectedFunction",
            Self::DisallowedDeclarations { .. } => "DisallowedDeclarations",
            Self::DisallowedReassignment { .. } => "DisallowedReassignment",
            Self::DisallowedLoops { .. } => "DisallowedLoops",
            Self::DisallowedIfStatements { .. } => "DisallowedIfStatements",
            Self::DisallowedImport { .. } => "DisallowedImport",
            Self::DisallowedConsole { .. } => "DisallowedConsole",
            Self::DisallowedHelperFunctions { .. } => "DisallowedHelperFunctions",
        }
    }

    /// The offending source text, if the violation points at code.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::MissingExpectedFunction { .. } => None,
            Self::DisallowedDeclarations { code, .. }
            | Self::DisallowedReassignment { code }
            | Self::DisallowedLoops { code }
            | Self::DisallowedIfStatements { code }
            | Self::DisallowedImport { code, .. }
            | Self::DisallowedConsole { code }
            | Self::DisallowedHelperFunctions { code } => Some(code),
        }
    }

    /// A short hint on how to fix the submission.
    #[must_use]
    pub fn help(&self) -> &'static str {
        match self {
            Self::MissingExpectedFunction { .. } => {
                "define each missing function at the top level of the file"
            }
            Self::DisallowedDeclarations { .. } => {
                "use one of the declaration kinds allowed by the exercise"
            }
            Self::DisallowedReassignment { .. } => {
                "compute a new value and bind it to a new name instead"
            }
            Self::DisallowedLoops { .. } => "use array methods or recursion instead of a loop",
            Self::DisallowedIfStatements { .. } => "use a conditional expression instead",
            Self::DisallowedImport { .. } => "only import modules listed in allowedImports",
            Self::DisallowedConsole { .. } => "return values instead of printing them",
            Self::DisallowedHelperFunctions { .. } => {
                "inline the helper into one of the expected functions"
            }
        }
    }
}

impl std::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingExpectedFunction { missing } => {
                write!(f, "missing expected function(s): {}", missing.join(", "))
            }
            Self::DisallowedDeclarations { disallowed, .. } => {
                write!(f, "`{disallowed}` declarations are not allowed")
            }
            Self::DisallowedReassignment { .. } => f.write_str("reassignment is not allowed"),
            Self::DisallowedLoops { .. } => f.write_str("loops are not allowed"),
            Self::DisallowedIfStatements { .. } => f.write_str("if statements are not allowed"),
            Self::DisallowedImport { name, .. } => write!(f, "import from `{name}` is not allowed"),
            Self::DisallowedConsole { .. } => f.write_str("console is not allowed"),
            Self::DisallowedHelperFunctions { .. } => {
                f.write_str("helper functions are not allowed")
            }
        }
    }
}

/// A violation together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// The violation itself.
    pub violation: RuleViolation,
    /// Span of the offending node; `None` for whole-file violations.
    pub span: Option<Span>,
}

impl Finding {
    /// Creates a finding anchored at `span`.
    #[must_use]
    pub fn at(violation: RuleViolation, span: Span) -> Self {
        Self {
            violation,
            span: Some(span),
        }
    }

    /// Creates a finding about the submission as a whole.
    #[must_use]
    pub fn whole_file(violation: RuleViolation) -> Self {
        Self {
            violation,
            span: None,
        }
    }
}

impl From<Finding> for RuleViolation {
    fn from(finding: Finding) -> Self {
        finding.violation
    }
}

/// A [`Finding`] rendered as a miette diagnostic over the submission.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("{label_message}")]
    span: Option<SourceSpan>,
    label_message: String,
}

impl ViolationDiagnostic {
    /// Builds a diagnostic for `finding` found in `source` (named `name`).
    #[must_use]
    pub fn new(finding: &Finding, name: &str, source: &str) -> Self {
        Self {
            message: format!("[{}] {}", finding.violation.tag(), finding.violation),
            help: Some(finding.violation.help().to_string()),
            source_code: NamedSource::new(name, source.to_string()),
            span: finding.span.map(|s| SourceSpan::from((s.start, s.len()))),
            label_message: finding.violation.tag().to_string(),
        }
    }
}
