// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The execution context: the ambient state every rule action runs with,
//! and the `need` / `need_fileset` / `when_needed` suspension primitives.

use crate::pool::WorkerPool;
use forge_core::{BuildErrorGroup, BuildFailure, EngineError, Level, Options, Target};
use forge_log::AggregateLogger;
use forge_rules::{Fileset, RuleRegistry};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OwnedSemaphorePermit;

struct Shared {
    options: Options,
    registry: RuleRegistry<Context>,
    pool: Arc<WorkerPool>,
    logger: Arc<AggregateLogger>,
}

/// The ambient state visible to every rule action, plus a per-task permit
/// slot that `need` releases and reacquires.
///
/// Cloning a `Context` is cheap — an `Arc` clone of the shared state — and
/// is how the context is threaded through a single rule action's own
/// `.clone()` calls. A *new* task (one spawned by the worker pool to build
/// a different target) gets a fresh permit slot via [`Context::for_task`],
/// so two concurrently-running tasks never share one permit.
#[derive(Clone)]
pub struct Context {
    shared: Arc<Shared>,
    permit: Arc<Mutex<Option<OwnedSemaphorePermit>>>,
}

impl Context {
    pub(crate) fn new(
        options: Options,
        registry: RuleRegistry<Context>,
        pool: Arc<WorkerPool>,
        logger: Arc<AggregateLogger>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                options,
                registry,
                pool,
                logger,
            }),
            permit: Arc::new(Mutex::new(None)),
        }
    }

    pub(crate) fn for_task(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            permit: Arc::new(Mutex::new(None)),
        }
    }

    pub fn options(&self) -> &Options {
        &self.shared.options
    }

    pub fn log(&self, level: Level, message: impl AsRef<str>) {
        self.shared.logger.log(level, message.as_ref());
    }

    /// Resolve a bare name to a target: phony takes precedence over a file
    /// of the same name (§4.1).
    pub fn resolve(&self, name: &str) -> Target {
        if self.shared.registry.has_phony(name) {
            Target::phony(name)
        } else {
            Target::file(&self.shared.options.project_root, name)
        }
    }

    /// Suspend until every target in `targets` has been built, releasing
    /// this task's worker slot for the duration of the wait and
    /// reacquiring one before returning. A call with no targets completes
    /// immediately without touching the permit.
    pub async fn need(
        &self,
        targets: impl IntoIterator<Item = Target>,
    ) -> Result<(), BuildFailure> {
        let targets: Vec<Target> = targets.into_iter().collect();
        if targets.is_empty() {
            return Ok(());
        }

        if let Some(permit) = self.permit.lock().take() {
            self.shared.pool.release_slot(permit);
        }

        let futures: Vec<_> = targets
            .iter()
            .map(|t| self.shared.pool.build(self, t.clone()))
            .collect();
        let results = futures::future::join_all(futures).await;

        let permit = self
            .shared
            .pool
            .acquire_slot("need")
            .await
            .map_err(BuildFailure::from)?;
        *self.permit.lock() = Some(permit);

        let failures: Vec<BuildFailure> = results.into_iter().filter_map(Result::err).collect();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(BuildErrorGroup::from_failures(failures))
        }
    }

    /// Expand `fileset` against the project root and `need` every match.
    pub async fn need_fileset(&self, fileset: &Fileset) -> Result<(), BuildFailure> {
        let targets = fileset
            .expand(&self.shared.options.project_root)
            .map_err(|e| BuildFailure::from(EngineError::Internal(e.to_string())))?;
        self.need(targets).await
    }

    /// Reserved incremental-rebuild primitive. Validity is always `Valid` in
    /// this engine, so `body` always runs; kept for forward signature
    /// compatibility with an eventual cache.
    pub async fn when_needed<F, Fut>(&self, _file: Target, body: F) -> Result<(), EngineError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), EngineError>>,
    {
        body().await
    }
}

/// Run the matched rule's action for `target`, acquiring a worker permit
/// first. A file target with no matching rule that already exists on disk
/// is treated as a pre-existing input and succeeds without running anything.
pub(crate) async fn execute_target(ctx: Context, target: Target) -> Result<(), BuildFailure> {
    let rule = ctx
        .shared
        .registry
        .locate(&target, &ctx.shared.options.project_root)
        .map_err(|e| BuildFailure::from(EngineError::Internal(e.to_string())))?
        .cloned();

    let rule = match rule {
        Some(rule) => rule,
        None if target.exists_on_disk() => return Ok(()),
        None => return Err(BuildFailure::from(EngineError::NoRule(target.display_name()))),
    };

    let permit = ctx
        .shared
        .pool
        .acquire_slot(&target.display_name())
        .await
        .map_err(BuildFailure::from)?;
    *ctx.permit.lock() = Some(permit);

    let result = (rule.action)(ctx.clone(), target.clone()).await;

    if let Some(permit) = ctx.permit.lock().take() {
        ctx.shared.pool.release_slot(permit);
    }

    result.map_err(BuildFailure::from)
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
