// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The driver: resolves options, a rule registry, and a want list into a
//! finished (or failed) build.

use crate::context::Context;
use crate::pool::WorkerPool;
use forge_core::time_fmt::format_elapsed;
use forge_core::{BuildErrorGroup, EngineError, Level, Options, Target};
use forge_log::{AggregateLogger, FileSink, Logger};
use forge_rules::RuleRegistry;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// What a successful (or non-fatal) `run` returns.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub elapsed_secs: u64,
    pub targets_requested: usize,
}

/// Resolve `options` and `registry` into a finished build.
///
/// `script_want` is the script builder's declared default want list,
/// consulted only when `options.want` is empty — an explicit
/// `Options::want` always wins. `custom_logger`, if given, is fanned every
/// build message alongside the console and optional file sinks; it lives
/// outside `Options` so `forge-core` doesn't need to depend on `forge-log`.
pub async fn run(
    options: Options,
    registry: RuleRegistry<Context>,
    script_want: Vec<String>,
    custom_logger: Option<Arc<dyn Logger>>,
) -> Result<RunSummary, EngineError> {
    options.validate()?;

    let mut logger = AggregateLogger::new(options.console_level);
    if let Some(path) = &options.file_log_path {
        logger = logger.with_file(FileSink::new(path.clone(), options.file_level));
    }
    if let Some(custom) = custom_logger {
        logger = logger.with_custom(custom);
    }
    let logger = Arc::new(logger);

    let pool = Arc::new(WorkerPool::new(options.threads));
    let want_names = if options.want.is_empty() {
        script_want
    } else {
        options.want.clone()
    };
    let ctx = Context::new(options.clone(), registry, pool.clone(), logger.clone());

    let targets: Vec<Target> = want_names.iter().map(|name| ctx.resolve(name)).collect();
    let want_label = want_names.join(", ");
    let span = tracing::info_span!("run", threads = options.threads, want = %want_label);

    let start = Instant::now();
    let result = async {
        let futures: Vec<_> = targets.iter().map(|t| pool.build(&ctx, t.clone())).collect();
        let results = futures::future::join_all(futures).await;
        let failures: Vec<_> = results.into_iter().filter_map(Result::err).collect();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(BuildErrorGroup::from_failures(failures))
        }
    }
    .instrument(span)
    .await;
    let elapsed = start.elapsed();

    pool.reset();

    let summary = RunSummary {
        elapsed_secs: elapsed.as_secs(),
        targets_requested: targets.len(),
    };

    match result {
        Ok(()) => {
            logger.log(
                Level::Message,
                &format!("Build completed in {}", format_elapsed(elapsed.as_secs())),
            );
            Ok(summary)
        }
        Err(failure) => {
            let leaves = BuildErrorGroup::flatten(&failure);
            let leaf_count = leaves.len();
            for leaf in &leaves {
                logger.log(Level::Error, &format!("Error: {leaf}"));
            }
            logger.log(
                Level::Message,
                &format!(
                    "Build failed after running for {}",
                    format_elapsed(elapsed.as_secs())
                ),
            );
            if options.fail_on_error {
                Err(EngineError::BuildFailed(leaf_count))
            } else {
                Ok(summary)
            }
        }
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
