// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::pool::WorkerPool;
use forge_rules::{Action, Fileset, Rule, TargetPattern};
use std::sync::atomic::{AtomicUsize, Ordering};

fn build_ctx(
    registry: RuleRegistry<Context>,
    project_root: &std::path::Path,
    threads: usize,
) -> Context {
    let options = Options {
        threads,
        project_root: project_root.to_path_buf(),
        ..Options::default()
    };
    let pool = Arc::new(WorkerPool::new(threads));
    let logger = Arc::new(AggregateLogger::new(Level::Chatty));
    Context::new(options, registry, pool, logger)
}

fn noop_action() -> Action<Context> {
    Arc::new(|_ctx, _target| Box::pin(async { Ok(()) }))
}

#[test]
fn resolve_prefers_phony_over_a_same_named_file() {
    let mut registry = RuleRegistry::new();
    registry.insert(Rule::new(TargetPattern::phony("all"), noop_action()));
    let dir = tempfile::tempdir().unwrap();
    let ctx = build_ctx(registry, dir.path(), 1);

    assert_eq!(ctx.resolve("all"), Target::phony("all"));
}

#[test]
fn resolve_falls_back_to_a_file_target() {
    let registry: RuleRegistry<Context> = RuleRegistry::new();
    let dir = tempfile::tempdir().unwrap();
    let ctx = build_ctx(registry, dir.path(), 1);

    assert_eq!(ctx.resolve("a.o"), Target::file(dir.path(), "a.o"));
}

#[tokio::test]
async fn need_with_no_targets_succeeds_immediately() {
    let registry: RuleRegistry<Context> = RuleRegistry::new();
    let dir = tempfile::tempdir().unwrap();
    let ctx = build_ctx(registry, dir.path(), 1);

    assert!(ctx.need(Vec::new()).await.is_ok());
}

#[tokio::test]
async fn need_builds_every_listed_target() {
    let counter = Arc::new(AtomicUsize::new(0));
    let c = counter.clone();
    let mut registry = RuleRegistry::new();
    registry.insert(Rule::new(
        TargetPattern::file("*.o"),
        Arc::new(move |_ctx, _target| {
            let c = c.clone();
            Box::pin(async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        }),
    ));
    let dir = tempfile::tempdir().unwrap();
    let ctx = build_ctx(registry, dir.path(), 2);

    let targets = vec![
        Target::file(dir.path(), "a.o"),
        Target::file(dir.path(), "b.o"),
    ];
    let result = ctx.need(targets).await;

    assert!(result.is_ok());
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn need_aggregates_failures_from_multiple_targets_in_listing_order() {
    let mut registry = RuleRegistry::new();
    registry.insert(Rule::new(
        TargetPattern::file("bad1.o"),
        Arc::new(|_ctx, t: Target| {
            Box::pin(async move { Err(EngineError::action_failed(t.display_name(), "nope")) })
        }),
    ));
    registry.insert(Rule::new(
        TargetPattern::file("bad2.o"),
        Arc::new(|_ctx, t: Target| {
            Box::pin(async move { Err(EngineError::action_failed(t.display_name(), "nope too")) })
        }),
    ));
    let dir = tempfile::tempdir().unwrap();
    let ctx = build_ctx(registry, dir.path(), 2);

    let targets = vec![
        Target::file(dir.path(), "bad1.o"),
        Target::file(dir.path(), "bad2.o"),
    ];
    let result = ctx.need(targets).await;

    let failure = result.expect_err("both targets should fail");
    let leaves = BuildErrorGroup::flatten(&failure);
    assert_eq!(leaves.len(), 2);
    assert!(leaves[0].to_string().contains("nope"));
}

#[tokio::test]
async fn need_fileset_expands_and_builds_matches() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.rs"), "").unwrap();
    std::fs::write(dir.path().join("b.rs"), "").unwrap();

    let counter = Arc::new(AtomicUsize::new(0));
    let c = counter.clone();
    let mut registry = RuleRegistry::new();
    registry.insert(Rule::new(
        TargetPattern::file("*.rs"),
        Arc::new(move |_ctx, _target| {
            let c = c.clone();
            Box::pin(async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        }),
    ));
    let ctx = build_ctx(registry, dir.path(), 2);

    let fileset = Fileset::new().with_pattern("*.rs");
    let result = ctx.need_fileset(&fileset).await;

    assert!(result.is_ok());
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn when_needed_always_evaluates_its_body() {
    let registry: RuleRegistry<Context> = RuleRegistry::new();
    let dir = tempfile::tempdir().unwrap();
    let ctx = build_ctx(registry, dir.path(), 1);

    let ran = Arc::new(AtomicUsize::new(0));
    let ran2 = ran.clone();
    let result = ctx
        .when_needed(Target::phony("irrelevant"), move || {
            let ran2 = ran2.clone();
            async move {
                ran2.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .await;

    assert!(result.is_ok());
    assert_eq!(ran.load(Ordering::SeqCst), 1);
}
