// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy shared by the rule registry, worker pool, and driver.

use thiserror::Error;

/// Errors the engine can raise while resolving or building a target.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No rule matched the target and no file exists for it.
    #[error("no rule to build target '{0}'")]
    NoRule(String),

    /// A user action returned or raised an error.
    #[error("action failed for '{target}': {message}")]
    ActionFailed { target: String, message: String },

    /// A future was aborted, typically via `WorkerPool::reset`.
    #[error("build of '{0}' was cancelled")]
    Cancelled(String),

    /// Options failed validation (e.g. `threads` is zero).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An engine invariant was broken (missing task entry, double-complete, …).
    #[error("internal engine error: {0}")]
    Internal(String),

    /// The driver's top-level want set failed and `fail_on_error` is set.
    #[error("build failed: {0} error(s)")]
    BuildFailed(usize),
}

impl EngineError {
    pub fn action_failed(target: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::ActionFailed {
            target: target.into(),
            message: message.into(),
        }
    }
}

/// A primary error plus whatever sibling errors completed alongside it.
///
/// Produced by `need` when more than one target in the same call fails, and
/// by the driver when more than one top-level want fails. Nests arbitrarily;
/// [`BuildErrorGroup::flatten`] walks a tree of groups down to its leaves.
#[derive(Debug, Error)]
#[error("{primary}{}", format_siblings(.siblings))]
pub struct BuildErrorGroup {
    pub primary: Box<BuildFailure>,
    pub siblings: Vec<BuildFailure>,
}

fn format_siblings(siblings: &[BuildFailure]) -> String {
    if siblings.is_empty() {
        String::new()
    } else {
        format!(" (+{} more)", siblings.len())
    }
}

/// Either a single engine error or a nested group of them.
#[derive(Debug, Error)]
pub enum BuildFailure {
    #[error(transparent)]
    Leaf(#[from] EngineError),
    #[error(transparent)]
    Group(#[from] BuildErrorGroup),
}

impl BuildErrorGroup {
    /// Combine one or more failures (in the order they were observed) into a
    /// group whose primary is the first and whose siblings are the rest.
    ///
    /// Panics if `failures` is empty — callers only invoke this once they
    /// know at least one target failed.
    pub fn from_failures(mut failures: Vec<BuildFailure>) -> BuildFailure {
        debug_assert!(!failures.is_empty(), "from_failures called with no failures");
        if failures.len() == 1 {
            return failures.remove(0);
        }
        let primary = Box::new(failures.remove(0));
        BuildFailure::Group(BuildErrorGroup {
            primary,
            siblings: failures,
        })
    }

    /// Recursively flatten a tree of groups into its leaf errors, in
    /// depth-first, left-to-right order (primary before siblings).
    pub fn flatten(failure: &BuildFailure) -> Vec<&EngineError> {
        let mut out = Vec::new();
        flatten_into(failure, &mut out);
        out
    }
}

fn flatten_into<'a>(failure: &'a BuildFailure, out: &mut Vec<&'a EngineError>) {
    match failure {
        BuildFailure::Leaf(e) => out.push(e),
        BuildFailure::Group(g) => {
            flatten_into(&g.primary, out);
            for s in &g.siblings {
                flatten_into(s, out);
            }
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
