// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesets: a declarative set of glob patterns, expanded against a project
//! root into concrete file targets.

use crate::pattern::{CompiledGlob, GlobError};
use forge_core::Target;
use std::path::{Path, PathBuf};

/// A named collection of glob patterns describing a set of files.
///
/// Filesets are declarative — they describe *where to look*, not the files
/// themselves — and are only resolved against the filesystem when
/// [`Fileset::expand`] is called, typically by `need_fileset` inside a rule
/// body.
#[derive(Debug, Clone, Default)]
pub struct Fileset {
    patterns: Vec<String>,
}

impl Fileset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Walk `project_root` and return every file matching at least one
    /// pattern, as `Target::File`, sorted by relative path for determinism.
    pub fn expand(&self, project_root: &Path) -> Result<Vec<Target>, GlobError> {
        let globs: Vec<CompiledGlob> = self
            .patterns
            .iter()
            .map(|p| CompiledGlob::compile(p))
            .collect::<Result<_, _>>()?;

        let mut relative_matches: Vec<PathBuf> = Vec::new();
        walk(project_root, project_root, &mut relative_matches, &globs);
        relative_matches.sort();

        Ok(relative_matches
            .into_iter()
            .map(|relative| Target::file(project_root, &relative.to_string_lossy()))
            .collect())
    }
}

fn walk(root: &Path, dir: &Path, out: &mut Vec<PathBuf>, globs: &[CompiledGlob]) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(root, &path, out, globs);
            continue;
        }
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        if globs.iter().any(|g| g.matches(relative)) {
            out.push(relative.to_path_buf());
        }
    }
}

#[cfg(test)]
#[path = "fileset_tests.rs"]
mod tests;
