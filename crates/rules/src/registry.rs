// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The rule registry: an order-preserving pattern → rule mapping.

use crate::pattern::{CompiledGlob, GlobError, TargetPattern};
use crate::rule::Rule;
use dashmap::DashMap;
use forge_core::Target;
use indexmap::IndexMap;
use std::path::Path;

/// An order-preserving mapping from [`TargetPattern`] to [`Rule`].
///
/// Backed by an `IndexMap` so declaration order survives re-declaration:
/// `insert` on an existing pattern keeps its original position but replaces
/// its action (last writer wins on content, first writer wins on position),
/// which is exactly what the glob tie-break in [`RuleRegistry::locate`]
/// depends on.
#[derive(Clone)]
pub struct RuleRegistry<Ctx> {
    rules: IndexMap<TargetPattern, Rule<Ctx>>,
    /// Compiled-glob cache keyed by the source pattern string, populated
    /// lazily the first time a pattern is tried in `locate` so repeated
    /// resolutions never recompile a glob that has already matched (or
    /// failed to match) before.
    globs: DashMap<String, CompiledGlob>,
}

impl<Ctx> Default for RuleRegistry<Ctx> {
    fn default() -> Self {
        Self {
            rules: IndexMap::new(),
            globs: DashMap::new(),
        }
    }
}

impl<Ctx> RuleRegistry<Ctx> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the rule for `rule.pattern`. Idempotent: declaring
    /// the same pattern twice keeps one entry, with the later action.
    pub fn insert(&mut self, rule: Rule<Ctx>) {
        self.rules.insert(rule.pattern.clone(), rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Find the rule (if any) that matches `target`, in declaration order.
    ///
    /// Phony targets match exactly; file targets are matched against
    /// `relative_to` (typically the project root) by compiling each
    /// `TargetPattern::File` glob and taking the first match.
    pub fn locate(&self, target: &Target, relative_to: &Path) -> Result<Option<&Rule<Ctx>>, GlobError> {
        match target {
            Target::Phony(name) => Ok(self
                .rules
                .get(&TargetPattern::Phony(name.clone()))),
            Target::File(path) => {
                let relative = path.strip_prefix(relative_to).unwrap_or(path);
                for (pattern, rule) in &self.rules {
                    if let TargetPattern::File(glob) = pattern {
                        let compiled = match self.globs.get(glob) {
                            Some(cached) => cached.clone(),
                            None => {
                                let compiled = CompiledGlob::compile(glob)?;
                                self.globs.insert(glob.clone(), compiled.clone());
                                compiled
                            }
                        };
                        if compiled.matches(relative) {
                            return Ok(Some(rule));
                        }
                    }
                }
                Ok(None)
            }
        }
    }

    /// Whether a bare name resolves to a phony pattern in this registry.
    ///
    /// Phony precedence over file targets for bare-name resolution (§4.1)
    /// relies on this check happening before a `Target::File` is even
    /// constructed.
    pub fn has_phony(&self, name: &str) -> bool {
        self.rules.contains_key(&TargetPattern::Phony(name.to_string()))
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
