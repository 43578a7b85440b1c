// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rules: a pattern paired with an action.
//!
//! The action's signature is generic over the execution context type `Ctx`
//! so that this crate has no dependency on the concrete context the worker
//! pool constructs — `forge-engine` supplies `Ctx` and owns what an action
//! actually does.

use crate::pattern::TargetPattern;
use forge_core::{EngineError, Target};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// A boxed, cloneable future — the shape every action returns.
pub type ActionFuture = Pin<Box<dyn Future<Output = Result<(), EngineError>> + Send>>;

/// A user-supplied rule body.
///
/// Invoked with the execution context and the resolved target (the specific
/// file that matched the rule's glob, or the phony name).
pub type Action<Ctx> = Arc<dyn Fn(Ctx, Target) -> ActionFuture + Send + Sync>;

/// A pattern paired with the action that builds targets matching it.
#[derive(Clone)]
pub struct Rule<Ctx> {
    pub pattern: TargetPattern,
    pub action: Action<Ctx>,
}

impl<Ctx> Rule<Ctx> {
    pub fn new(pattern: TargetPattern, action: Action<Ctx>) -> Self {
        Self { pattern, action }
    }
}

impl<Ctx> std::fmt::Debug for Rule<Ctx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("pattern", &self.pattern).finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "rule_tests.rs"]
mod tests;
