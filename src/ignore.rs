//! File and directory exclusion rules for template trees.
//! Combines glob patterns (build artifacts, caches, VCS metadata) with the
//! hidden-directory policy that drops dot-directories other than a small
//! preserved set.

use crate::constants::{DEFAULT_EXCLUDE_PATTERNS, PRESERVED_HIDDEN_DIRS};
use crate::error::{Error, Result};
use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use log::debug;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// A pattern containing `/`.
#[derive(Debug, Clone)]
struct NestedPattern {
    segments: usize,
    /// Contains `**`, which spans any number of components
    globstar: bool,
    matcher: GlobMatcher,
}

impl NestedPattern {
    fn matches(&self, components: &[&OsStr]) -> bool {
        if self.globstar {
            (0..components.len()).any(|start| self.matcher.is_match(join(&components[start..])))
        } else {
            components
                .windows(self.segments)
                .any(|window| self.matcher.is_match(join(window)))
        }
    }
}

fn join(components: &[&OsStr]) -> PathBuf {
    components.iter().collect()
}

/// Compiled exclusion rules.
///
/// Single-segment patterns (`*.pyc`, `node_modules`) are tested against
/// every component of a relative path; multi-segment patterns (`docs/build`)
/// are tested against every contiguous run of components of the same length.
/// Patterns with `**` are tested against every trailing run of components,
/// so `**/secret.txt` also matches at the root.
#[derive(Debug, Clone)]
pub struct ExclusionRules {
    segment_patterns: GlobSet,
    nested_patterns: Vec<NestedPattern>,
    preserved_hidden: Vec<String>,
}

impl ExclusionRules {
    /// Compiles `patterns` with the default preserved hidden directories.
    ///
    /// # Errors
    /// * `Error::IgnoreError` if any pattern is not a valid glob
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        let mut nested_patterns = Vec::new();

        for pattern in patterns {
            let pattern = pattern.as_ref().trim_matches('/');
            if pattern.is_empty() {
                continue;
            }
            let segments = pattern.split('/').count();
            if segments == 1 {
                builder.add(compile(pattern)?);
            } else {
                nested_patterns.push(NestedPattern {
                    segments,
                    globstar: pattern.contains("**"),
                    matcher: compile(pattern)?.compile_matcher(),
                });
            }
        }

        let segment_patterns = builder
            .build()
            .map_err(|e| Error::IgnoreError(format!("exclusion patterns failed to load: {e}")))?;

        Ok(Self {
            segment_patterns,
            nested_patterns,
            preserved_hidden: PRESERVED_HIDDEN_DIRS.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Compiles the built-in exclusion set.
    pub fn with_defaults() -> Result<Self> {
        Self::new(&DEFAULT_EXCLUDE_PATTERNS)
    }

    /// Adds hidden directory names that must not be excluded.
    pub fn preserve_hidden<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.preserved_hidden.contains(&name) {
                self.preserved_hidden.push(name);
            }
        }
        self
    }

    pub fn preserved_hidden(&self) -> &[String] {
        &self.preserved_hidden
    }

    /// Returns true when `relative_path` (relative to the template root)
    /// must not be rendered.
    pub fn is_excluded<P: AsRef<Path>>(&self, relative_path: P) -> bool {
        let relative_path = relative_path.as_ref();
        let components = normal_components(relative_path);

        if components.iter().any(|part| self.segment_patterns.is_match(part)) {
            debug!("Excluding {} by pattern", relative_path.display());
            return true;
        }

        if self.nested_patterns.iter().any(|pattern| pattern.matches(&components)) {
            debug!("Excluding {} by nested pattern", relative_path.display());
            return true;
        }

        let ancestors = relative_path.parent().map(normal_components).unwrap_or_default();
        if ancestors.iter().any(|part| self.is_hidden_dir(part)) {
            debug!("Excluding {} under hidden directory", relative_path.display());
            return true;
        }

        false
    }

    fn is_hidden_dir(&self, name: &OsStr) -> bool {
        name.as_encoded_bytes().starts_with(b".")
            && !self.preserved_hidden.iter().any(|kept| name == kept.as_str())
    }
}

fn normal_components(path: &Path) -> Vec<&OsStr> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

fn compile(pattern: &str) -> Result<Glob> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| Error::IgnoreError(format!("invalid exclusion pattern '{pattern}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_exclude_dependency_caches() {
        let rules = ExclusionRules::with_defaults().unwrap();
        assert!(rules.is_excluded("frontend/node_modules/react/index.js"));
        assert!(rules.is_excluded("backend/app/__pycache__/main.cpython-311.pyc"));
        assert!(rules.is_excluded("pkg.egg-info/PKG-INFO"));
        assert!(!rules.is_excluded("frontend/src/index.ts"));
    }

    #[test]
    fn test_hidden_file_at_leaf_is_kept() {
        let rules = ExclusionRules::with_defaults().unwrap();
        assert!(!rules.is_excluded(".gitignore"));
        assert!(!rules.is_excluded("backend/.env.example"));
    }

    #[test]
    fn test_nested_pattern_matches_contiguous_components() {
        let rules = ExclusionRules::new(&["docs/_build"]).unwrap();
        assert!(rules.is_excluded("site/docs/_build/index.html"));
        assert!(!rules.is_excluded("docs/src/_build.md"));
    }
}
