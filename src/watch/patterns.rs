// src/watch/patterns.rs

use std::fmt;
use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::errors::Result;
use crate::watch::path_utils::slash_path;

/// Patterns that are always excluded: editor swap files, vendored code,
/// VCS metadata, build files and lock files.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "**/*.swp",
    "**/*.swx",
    "vendor/",
    ".git",
    ".ignore",
    ".gitignore",
    "**/*file",
    "*.lock",
];

/// Compiled exclude globs.
///
/// Matching rules:
/// - patterns are relative to the working directory; a leading `./` and a
///   trailing `/` are ignored,
/// - `*` does not cross `/`, `**` does,
/// - a path is excluded when the path itself or any ancestor directory of
///   it matches, so `.git` also excludes `.git/HEAD`.
#[derive(Clone)]
pub struct ExcludeList {
    patterns: Vec<String>,
    set: GlobSet,
}

impl fmt::Debug for ExcludeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExcludeList")
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl ExcludeList {
    /// Compile exactly the given patterns.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::new();

        for pat in patterns {
            let pat = normalize_pattern(pat.as_ref());
            if pat.is_empty() {
                continue;
            }
            let glob = GlobBuilder::new(&pat).literal_separator(true).build()?;
            builder.add(glob);
            kept.push(pat);
        }

        Ok(Self {
            patterns: kept,
            set: builder.build()?,
        })
    }

    /// Compile [`DEFAULT_EXCLUDES`] followed by `extra`.
    pub fn with_defaults<I, S>(extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra: Vec<String> = extra.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::new(
            DEFAULT_EXCLUDES
                .iter()
                .map(|s| s.to_string())
                .chain(extra),
        )
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Returns true if `path` (or one of its parent directories) matches an
    /// exclude pattern.
    pub fn is_match(&self, path: &Path) -> bool {
        let rel = slash_path(path);
        if rel.is_empty() {
            return false;
        }

        let mut prefix = String::with_capacity(rel.len());
        for component in rel.split('/') {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(component);
            if self.set.is_match(&prefix) {
                return true;
            }
        }
        false
    }
}

fn normalize_pattern(pat: &str) -> String {
    let mut pat = pat.trim();
    while let Some(rest) = pat.strip_prefix("./") {
        pat = rest;
    }
    pat.trim_end_matches('/').to_string()
}
