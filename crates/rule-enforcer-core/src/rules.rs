//! The rules document: which constraints a submission must satisfy.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Declaration keyword kinds that `validDeclarations` can allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    /// `const x = ...`
    Const,
    /// `let x = ...`
    Let,
    /// `var x = ...`
    Var,
}

impl DeclarationKind {
    /// All kinds, in the order the declaration check reports them.
    pub const ALL: [Self; 3] = [Self::Const, Self::Let, Self::Var];

    /// The keyword as written in source.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Const => "const",
            Self::Let => "let",
            Self::Var => "var",
        }
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Constructs that can be forbidden through the `disallow` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Disallow {
    /// `x = 1`, `x += 1`, `x++` outside of declarations.
    Reassignment,
    /// `for`, `for..of`, `while`, `do..while` (`for..in` is allowed).
    Loops,
    /// `if` statements, including `else if` links.
    IfStatements,
    /// Any reference to the `console` identifier.
    Console,
    /// Functions whose name is not in `expectedFunctions`.
    HelperFunctions,
}

impl Disallow {
    /// Every value, in rules-document order.
    pub const ALL: [Self; 5] = [
        Self::Reassignment,
        Self::Loops,
        Self::IfStatements,
        Self::Console,
        Self::HelperFunctions,
    ];
}

/// A rules document.
///
/// Every field is optional. An absent field imposes no constraint; it never
/// means "require emptiness". Unknown keys are ignored and `null` counts as
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rules {
    /// Names of top-level functions the submission must define.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_functions: Option<Vec<String>>,

    /// Declaration kinds allowed; any kind not listed is forbidden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_declarations: Option<Vec<DeclarationKind>>,

    /// Import allow-list patterns (`"module"`, `"module.part"`, `"*"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_imports: Option<Vec<String>>,

    /// Constructs the submission must not use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disallow: Option<Vec<Disallow>>,
}

impl Rules {
    /// Creates a rules document that imposes no constraint.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the required top-level function names.
    #[must_use]
    pub fn expected_functions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_functions = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the allowed declaration kinds.
    #[must_use]
    pub fn valid_declarations(mut self, kinds: impl IntoIterator<Item = DeclarationKind>) -> Self {
        self.valid_declarations = Some(kinds.into_iter().collect());
        self
    }

    /// Sets the import allow-list patterns.
    #[must_use]
    pub fn allowed_imports<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_imports = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the forbidden constructs.
    #[must_use]
    pub fn disallow(mut self, constructs: impl IntoIterator<Item = Disallow>) -> Self {
        self.disallow = Some(constructs.into_iter().collect());
        self
    }

    /// Returns true if `construct` is listed in `disallow`.
    #[must_use]
    pub fn disallows(&self, construct: Disallow) -> bool {
        self.disallow
            .as_ref()
            .is_some_and(|list| list.contains(&construct))
    }

    /// Returns true if `name` is listed in `expectedFunctions`.
    #[must_use]
    pub fn expects_function(&self, name: &str) -> bool {
        self.expected_functions
            .as_ref()
            .is_some_and(|names| names.iter().any(|n| n == name))
    }

    /// Returns true if declarations of `kind` are allowed.
    ///
    /// Without a `validDeclarations` list every kind is allowed.
    #[must_use]
    pub fn allows_declaration(&self, kind: DeclarationKind) -> bool {
        self.valid_declarations
            .as_ref()
            .map_or(true, |kinds| kinds.contains(&kind))
    }

    /// Loads a rules document, choosing the format by file extension
    /// (`.toml` is TOML, anything else JSON).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or decoded.
    pub fn from_file(path: &Path) -> Result<Self, RulesError> {
        let content = std::fs::read_to_string(path).map_err(|e| RulesError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        if path.extension().and_then(|e| e.to_str()) == Some("toml") {
            Self::from_toml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    /// Parses a JSON rules document.
    ///
    /// Text that is not JSON and JSON that does not fit the schema are
    /// reported as distinct errors.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Malformed`] or [`RulesError::Schema`].
    pub fn from_json(content: &str) -> Result<Self, RulesError> {
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|e| RulesError::Malformed(e.to_string()))?;
        serde_json::from_value(value).map_err(|e| RulesError::Schema(e.to_string()))
    }

    /// Parses a TOML rules document using the same keys as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Malformed`] or [`RulesError::Schema`].
    pub fn from_toml(content: &str) -> Result<Self, RulesError> {
        let value: toml::Value =
            toml::from_str(content).map_err(|e| RulesError::Malformed(e.to_string()))?;
        value
            .try_into::<Self>()
            .map_err(|e: toml::de::Error| RulesError::Schema(e.to_string()))
    }
}

/// Errors when loading a rules document.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    /// Failed to read the rules file.
    #[error("Failed to read rules file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The text is not valid JSON (or TOML).
    #[error("Cannot parse rules: {0}")]
    Malformed(String),

    /// The document parses but does not match the rules schema.
    #[error("Rules do not match the schema: {0}")]
    Schema(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_imposes_nothing() {
        let rules = Rules::from_json("{}").expect("parse failed");
        assert_eq!(rules, Rules::default());
        assert!(!rules.disallows(Disallow::Loops));
        assert!(rules.allows_declaration(DeclarationKind::Var));
    }

    #[test]
    fn parses_full_document() {
        let json = r#"{
  "expectedFunctions": ["f"],
  "validDeclarations": ["const"],
  "allowedImports": ["*"],
  "disallow": [
    "reassignment",
    "loops",
    "if-statements",
    "console",
    "helper-functions"
  ]
}"#;
        let rules = Rules::from_json(json).expect("parse failed");
        assert_eq!(rules.expected_functions, Some(vec!["f".to_string()]));
        assert_eq!(rules.valid_declarations, Some(vec![DeclarationKind::Const]));
        assert_eq!(rules.allowed_imports, Some(vec!["*".to_string()]));
        for construct in Disallow::ALL {
            assert!(rules.disallows(construct));
        }
        assert!(!rules.allows_declaration(DeclarationKind::Let));
    }

    #[test]
    fn empty_valid_declarations_is_not_absent() {
        let rules = Rules::from_json(r#"{ "validDeclarations": [] }"#).expect("parse failed");
        assert_eq!(rules.valid_declarations, Some(vec![]));
        assert!(!rules.allows_declaration(DeclarationKind::Const));
    }

    #[test]
    fn unknown_keys_and_nulls_are_tolerated() {
        let rules = Rules::from_json(r#"{ "disallow": null, "hint": "be kind" }"#)
            .expect("parse failed");
        assert_eq!(rules, Rules::default());
    }

    #[test]
    fn malformed_json_is_distinct_from_schema_mismatch() {
        let malformed = Rules::from_json("{ not json").unwrap_err();
        assert!(matches!(malformed, RulesError::Malformed(_)));
        assert!(malformed.to_string().starts_with("Cannot parse rules"));

        let schema = Rules::from_json(r#"{ "disallow": ["goto"] }"#).unwrap_err();
        assert!(matches!(schema, RulesError::Schema(_)));

        let wrong_type = Rules::from_json(r#"{ "expectedFunctions": "f" }"#).unwrap_err();
        assert!(matches!(wrong_type, RulesError::Schema(_)));
    }

    #[test]
    fn parses_toml_document() {
        let toml = r#"
expectedFunctions = ["main"]
validDeclarations = ["const", "let"]
disallow = ["loops"]
"#;
        let rules = Rules::from_toml(toml).expect("parse failed");
        assert_eq!(rules.expected_functions, Some(vec!["main".to_string()]));
        assert!(rules.disallows(Disallow::Loops));
        assert!(rules.allowed_imports.is_none());

        let err = Rules::from_toml("disallow = [\"recursion\"]").unwrap_err();
        assert!(matches!(err, RulesError::Schema(_)));
    }

    #[test]
    fn from_file_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("rules.json");
        let toml_path = dir.path().join("rules.toml");
        std::fs::write(&json_path, r#"{ "disallow": ["console"] }"#).unwrap();
        std::fs::write(&toml_path, "disallow = [\"console\"]\n").unwrap();

        let from_json = Rules::from_file(&json_path).unwrap();
        let from_toml = Rules::from_file(&toml_path).unwrap();
        assert_eq!(from_json, from_toml);

        let missing = Rules::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(missing, RulesError::Io { .. }));
    }

    #[test]
    fn builder_matches_parsed_document() {
        let built = Rules::new()
            .expected_functions(["f"])
            .disallow([Disallow::HelperFunctions]);
        let parsed = Rules::from_json(
            r#"{ "expectedFunctions": ["f"], "disallow": ["helper-functions"] }"#,
        )
        .unwrap();
        assert_eq!(built, parsed);
        assert!(built.expects_function("f"));
        assert!(!built.expects_function("g"));
    }
}
