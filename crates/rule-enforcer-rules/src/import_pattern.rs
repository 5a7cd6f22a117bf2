//! Two-level import allow-list built from dotted pattern strings.
//!
//! | pattern | meaning |
//! |---------|---------|
//! | `*` | every module, every part |
//! | `module` | every part of `module` |
//! | `module.part` | only `part` of `module` (repeatable) |
//!
//! For a multi-dot pattern the module is the text before the first dot
//! and the part is the text after the last dot.

use std::collections::HashMap;

static ALL_PARTS: ModuleParts = ModuleParts::AllowAllParts;

/// What may be imported from one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleParts {
    /// Every exported name.
    AllowAllParts,
    /// Only these names, in pattern order.
    Parts(Vec<String>),
}

impl ModuleParts {
    /// True if `name` may be imported from the module.
    #[must_use]
    pub fn allows(&self, name: &str) -> bool {
        match self {
            Self::AllowAllParts => true,
            Self::Parts(parts) => parts.iter().any(|p| p == name),
        }
    }
}

/// The compiled allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedImports {
    /// `*` was listed.
    AllowAllModules,
    /// Only the listed modules.
    Modules(HashMap<String, ModuleParts>),
}

impl Default for AllowedImports {
    fn default() -> Self {
        Self::Modules(HashMap::new())
    }
}

impl AllowedImports {
    /// Folds patterns left to right into an allow-list.
    ///
    /// An empty pattern list allows nothing.
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns
            .into_iter()
            .fold(Self::default(), |acc, p| acc.with_pattern(p.as_ref()))
    }

    /// Adds one pattern.
    #[must_use]
    pub fn with_pattern(self, pattern: &str) -> Self {
        let Self::Modules(mut modules) = self else {
            return Self::AllowAllModules;
        };

        if pattern == "*" {
            return Self::AllowAllModules;
        }

        match split_pattern(pattern) {
            None => {
                modules.insert(pattern.to_string(), ModuleParts::AllowAllParts);
            }
            Some((module, part)) => match modules.get_mut(module) {
                Some(ModuleParts::AllowAllParts) => {}
                Some(ModuleParts::Parts(parts)) => parts.push(part.to_string()),
                None => {
                    modules.insert(module.to_string(), ModuleParts::Parts(vec![part.to_string()]));
                }
            },
        }
        Self::Modules(modules)
    }

    /// Parts allowed for `module`, or `None` if the module is not listed.
    #[must_use]
    pub fn module(&self, module: &str) -> Option<&ModuleParts> {
        match self {
            Self::AllowAllModules => Some(&ALL_PARTS),
            Self::Modules(modules) => modules.get(module),
        }
    }

    /// True if every name in `bound` may be imported from `module`.
    pub fn allows<'a>(&self, module: &str, bound: impl IntoIterator<Item = &'a str>) -> bool {
        match self.module(module) {
            None => false,
            Some(parts) => bound.into_iter().all(|name| parts.allows(name)),
        }
    }
}

/// `"a.b.c"` gives `("a", "c")`; patterns without a dot give `None`.
fn split_pattern(pattern: &str) -> Option<(&str, &str)> {
    let (module, _) = pattern.split_once('.')?;
    let (_, part) = pattern.rsplit_once('.')?;
    Some((module, part))
}
