//! Locating the rules document for a submission.
//!
//! Candidates are tried in order and the first existing file wins:
//!
//! 1. the `--rules` path, taken as given
//! 2. `rule-enforcer.json`, `.rule-enforcer.json`, `rule-enforcer.toml`
//!    beside the submission
//! 3. `rules.json`, `rules.toml` in the global directory
//!    (`$RULE_ENFORCER_CONFIG_DIR` or `~/.rule-enforcer/`)
//!
//! The extension picks the parser. Anything other than `.json` or `.toml`
//! is rejected before the file is read.

use rule_enforcer::{Rules, RulesError};
use std::fmt;
use std::path::{Path, PathBuf};

/// Rules document names looked up beside the submission.
const SUBMISSION_RULES: &[&str] = &[
    "rule-enforcer.json",
    ".rule-enforcer.json",
    "rule-enforcer.toml",
];

/// Rules document names looked up in the global directory.
const GLOBAL_RULES: &[&str] = &["rules.json", "rules.toml"];

/// Serialization of a rules document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesFormat {
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl RulesFormat {
    /// Format named by the file extension, if supported.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Parses `content` as a rules document in this format.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Malformed`] or [`RulesError::Schema`].
    pub fn parse(self, content: &str) -> Result<Rules, RulesError> {
        match self {
            Self::Json => Rules::from_json(content),
            Self::Toml => Rules::from_toml(content),
        }
    }
}

/// Which candidate produced the rules document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The `--rules` flag.
    Flag,
    /// The submission's directory.
    Submission,
    /// The global config directory.
    Global,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Flag => "--rules",
            Self::Submission => "submission directory",
            Self::Global => "global config",
        })
    }
}

/// A located rules document with a known format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRules {
    /// Path of the document.
    pub path: PathBuf,
    /// Parser chosen from the extension.
    pub format: RulesFormat,
    /// Candidate that matched.
    pub origin: Origin,
}

impl ResolvedRules {
    fn new(path: PathBuf, origin: Origin) -> Result<Self, ResolveError> {
        let Some(format) = RulesFormat::from_path(&path) else {
            return Err(ResolveError::UnsupportedFormat(path));
        };
        Ok(Self {
            path,
            format,
            origin,
        })
    }

    /// Reads and parses the document.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Io`] when the file cannot be read, otherwise the
    /// parse error of [`RulesFormat::parse`].
    pub fn load(&self) -> Result<Rules, RulesError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| RulesError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.format.parse(&content)
    }
}

/// Errors when locating a rules document.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// No candidate exists.
    #[error(
        "No rules document found for {}. Run `rule-enforcer init` to create one.",
        .project_dir.display()
    )]
    NotFound {
        /// Directory searched for submission rules.
        project_dir: PathBuf,
    },

    /// The path has neither a `.json` nor a `.toml` extension.
    #[error("Unsupported rules document {}: expected a .json or .toml file", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Locates the rules document for a submission in `project_dir`.
///
/// # Errors
///
/// See [`ResolveError`].
pub fn resolve(
    project_dir: &Path,
    explicit: Option<&Path>,
) -> Result<ResolvedRules, ResolveError> {
    resolve_in(project_dir, explicit, global_config_dir().as_deref())
}

fn resolve_in(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<&Path>,
) -> Result<ResolvedRules, ResolveError> {
    if let Some(path) = explicit {
        return ResolvedRules::new(path.to_path_buf(), Origin::Flag);
    }

    let beside = SUBMISSION_RULES
        .iter()
        .map(|name| (project_dir.join(name), Origin::Submission));
    let global = global_dir.into_iter().flat_map(|dir| {
        GLOBAL_RULES
            .iter()
            .map(move |name| (dir.join(name), Origin::Global))
    });

    let Some((path, origin)) = beside.chain(global).find(|(path, _)| path.is_file()) else {
        return Err(ResolveError::NotFound {
            project_dir: project_dir.to_path_buf(),
        });
    };

    tracing::debug!(%origin, "Found rules: {}", path.display());
    ResolvedRules::new(path, origin)
}

/// Global config directory: `$RULE_ENFORCER_CONFIG_DIR`, else
/// `~/.rule-enforcer/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os("RULE_ENFORCER_CONFIG_DIR") {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|h| h.join(".rule-enforcer")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            RulesFormat::from_path(Path::new("a/.rule-enforcer.json")),
            Some(RulesFormat::Json)
        );
        assert_eq!(
            RulesFormat::from_path(Path::new("rules.toml")),
            Some(RulesFormat::Toml)
        );
        assert_eq!(RulesFormat::from_path(Path::new("rules.yaml")), None);
        assert_eq!(RulesFormat::from_path(Path::new("rules")), None);
    }

    #[test]
    fn flag_is_taken_without_checking_existence() {
        let resolved =
            resolve_in(Path::new("/tmp"), Some(Path::new("/nonexistent.toml")), None).unwrap();
        assert_eq!(
            resolved,
            ResolvedRules {
                path: PathBuf::from("/nonexistent.toml"),
                format: RulesFormat::Toml,
                origin: Origin::Flag,
            }
        );
    }

    #[test]
    fn flag_with_unknown_extension_is_rejected() {
        let err = resolve_in(Path::new("/tmp"), Some(Path::new("rules.yaml")), None).unwrap_err();
        assert!(
            matches!(err, ResolveError::UnsupportedFormat(ref p) if p == Path::new("rules.yaml"))
        );
        assert!(err.to_string().contains(".json or .toml"));
    }

    #[test]
    fn flag_wins_over_submission_rules() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("rule-enforcer.json"), "{}").unwrap();
        let explicit = tmp.path().join("strict.json");

        let resolved = resolve_in(tmp.path(), Some(&explicit), None).unwrap();
        assert_eq!(resolved.origin, Origin::Flag);
        assert_eq!(resolved.path, explicit);
    }

    #[test]
    fn submission_names_checked_in_order() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("rule-enforcer.toml"), "").unwrap();
        let resolved = resolve_in(tmp.path(), None, None).unwrap();
        assert_eq!(resolved.format, RulesFormat::Toml);

        fs::write(tmp.path().join(".rule-enforcer.json"), "{}").unwrap();
        let resolved = resolve_in(tmp.path(), None, None).unwrap();
        assert_eq!(resolved.path, tmp.path().join(".rule-enforcer.json"));

        fs::write(tmp.path().join("rule-enforcer.json"), "{}").unwrap();
        let resolved = resolve_in(tmp.path(), None, None).unwrap();
        assert_eq!(resolved.path, tmp.path().join("rule-enforcer.json"));
        assert_eq!(resolved.origin, Origin::Submission);
    }

    #[test]
    fn directory_named_like_rules_is_skipped() {
        let project = TempDir::new().unwrap();
        fs::create_dir(project.path().join("rule-enforcer.json")).unwrap();

        let err = resolve_in(project.path(), None, None).unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { .. }));
    }

    #[test]
    fn global_toml_is_found_when_submission_has_none() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("rules.toml"), "disallow = [\"loops\"]\n").unwrap();

        let resolved = resolve_in(project.path(), None, Some(global.path())).unwrap();
        assert_eq!(resolved.origin, Origin::Global);
        assert_eq!(resolved.format, RulesFormat::Toml);
        assert!(resolved.load().unwrap().disallows(rule_enforcer::Disallow::Loops));
    }

    #[test]
    fn submission_rules_shadow_global() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("rule-enforcer.json"), "{}").unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("rules.json"), "{}").unwrap();

        let resolved = resolve_in(project.path(), None, Some(global.path())).unwrap();
        assert_eq!(resolved.origin, Origin::Submission);
    }

    #[test]
    fn nothing_found_suggests_init() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        let err = resolve_in(project.path(), None, Some(global.path())).unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { .. }));
        assert!(err.to_string().contains("rule-enforcer init"));
    }

    #[test]
    fn load_parses_with_the_resolved_format() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("rules.toml");
        fs::write(&path, "{\"disallow\": [\"loops\"]}").unwrap();

        let resolved = resolve_in(tmp.path(), Some(&path), None).unwrap();
        assert!(matches!(resolved.load(), Err(RulesError::Malformed(_))));
    }

    #[test]
    fn load_reports_unreadable_path() {
        let explicit = Path::new("/nonexistent/r.json");
        let resolved = resolve_in(Path::new("/tmp"), Some(explicit), None).unwrap();
        assert!(matches!(resolved.load(), Err(RulesError::Io { .. })));
    }
}
