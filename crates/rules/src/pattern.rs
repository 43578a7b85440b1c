// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Target patterns: the left-hand side of a rule, and glob compilation.

use regex::Regex;
use std::path::Path;
use thiserror::Error;

/// The left-hand side of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetPattern {
    /// A shell-style glob mask (`*`, `**`, `?`) matched against a path
    /// relative to the project root.
    File(String),
    /// An exact phony-target name.
    Phony(String),
}

impl TargetPattern {
    pub fn file(glob: impl Into<String>) -> Self {
        TargetPattern::File(glob.into())
    }

    pub fn phony(name: impl Into<String>) -> Self {
        TargetPattern::Phony(name.into())
    }
}

#[derive(Debug, Error)]
pub enum GlobError {
    #[error("invalid glob pattern '{pattern}': {source}")]
    Invalid {
        pattern: String,
        source: regex::Error,
    },
}

/// A [`TargetPattern::File`] glob compiled into a matcher.
///
/// `*` expands to one-or-more non-separator characters, `**` to zero-or-more
/// path segments (crossing separators), `?` to a single non-separator
/// character, and `.` is literal. Both `/` and `\` are accepted as
/// separators in the source pattern; matching is always performed against a
/// `/`-normalized relative path.
#[derive(Debug, Clone)]
pub struct CompiledGlob {
    source: String,
    regex: Regex,
}

impl CompiledGlob {
    pub fn compile(pattern: &str) -> Result<Self, GlobError> {
        let regex_src = glob_to_regex(pattern);
        let regex = Regex::new(&regex_src).map_err(|source| GlobError::Invalid {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Match against a path relative to the project root.
    pub fn matches(&self, relative_path: &Path) -> bool {
        let normalized = relative_path.to_string_lossy().replace('\\', "/");
        self.regex.is_match(&normalized)
    }
}

fn glob_to_regex(pattern: &str) -> String {
    let normalized = pattern.replace('\\', "/");
    let chars: Vec<char> = normalized.chars().collect();
    let mut out = String::from("^");
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                i += 1; // consumed the second '*'
                if chars.get(i + 1) == Some(&'/') {
                    // "**/" — zero or more whole path segments, including none
                    out.push_str("(?:.*/)?");
                    i += 1; // also consume the separator
                } else {
                    out.push_str(".*");
                }
            }
            '*' => out.push_str("[^/]+"),
            '?' => out.push_str("[^/]"),
            '.' => out.push_str(r"\."),
            c => out.push_str(&regex::escape(&c.to_string())),
        }
        i += 1;
    }
    out.push('$');
    out
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
