// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The worker pool: a deduplicating, permit-throttled task table.
//!
//! Backed by a `DashMap<Target, Shared<BoxFuture>>` plus a `Semaphore`, the
//! shape a concurrent build orchestrator in this ecosystem reaches for when
//! it needs at-most-once execution per target under bounded parallelism.

use crate::context::{self, Context};
use dashmap::DashMap;
use forge_core::{BuildFailure, EngineError, Target};
use futures::future::{FutureExt, Shared};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::AbortHandle;
use tracing::Instrument;

type RawBuildFuture = Pin<Box<dyn Future<Output = Result<(), BuildFailure>> + Send>>;
pub type BuildFuture = Shared<RawBuildFuture>;

/// Bounds concurrent rule-action execution and memoizes in-flight/completed
/// builds by target, so each target's action body runs at most once per
/// run regardless of how many callers `need` it.
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
    futures: DashMap<Target, BuildFuture>,
    handles: DashMap<Target, AbortHandle>,
}

impl WorkerPool {
    pub fn new(threads: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(threads)),
            futures: DashMap::new(),
            handles: DashMap::new(),
        }
    }

    /// Request that `target` be built. Returns a handle to the existing
    /// future if one is already running or completed; otherwise spawns a
    /// fresh task bound to a per-task clone of `ctx`.
    pub fn build(&self, ctx: &Context, target: Target) -> BuildFuture {
        self.futures
            .entry(target.clone())
            .or_insert_with(|| {
                let task_ctx = ctx.for_task();
                let spawn_target = target.clone();
                let span = tracing::info_span!("build", target = %target);
                let join =
                    tokio::spawn(context::execute_target(task_ctx, spawn_target).instrument(span));
                self.handles.insert(target.clone(), join.abort_handle());

                let display = target.display_name();
                let raw: RawBuildFuture = Box::pin(async move {
                    join.await
                        .unwrap_or_else(|_| Err(BuildFailure::from(EngineError::Cancelled(display))))
                });
                raw.shared()
            })
            .clone()
    }

    /// A diagnostic read: the existing future for `target`, if any, without
    /// creating one.
    pub fn lookup(&self, target: &Target) -> Option<BuildFuture> {
        self.futures.get(target).map(|entry| entry.value().clone())
    }

    /// Cancel every pending task and clear the table. Used between runs and
    /// on fatal failure.
    pub fn reset(&self) {
        for entry in self.handles.iter() {
            entry.value().abort();
        }
        self.handles.clear();
        self.futures.clear();
    }

    pub fn in_flight(&self) -> usize {
        self.futures.len()
    }

    /// Acquire one worker-budget slot, suspending until a permit is free.
    /// `label` identifies the waiter for the `Cancelled` error raised if the
    /// pool is torn down while the caller is waiting.
    pub async fn acquire_slot(&self, label: &str) -> Result<OwnedSemaphorePermit, EngineError> {
        self.semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| EngineError::Cancelled(label.to_string()))
    }

    /// Give back a worker-budget slot. A rule body releases its slot before
    /// suspending on `need` and reacquires one (via [`Self::acquire_slot`])
    /// before resuming, so the pool does not deadlock when `threads` is
    /// smaller than the dependency chain's depth.
    pub fn release_slot(&self, permit: OwnedSemaphorePermit) {
        drop(permit);
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
