// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! forge - a thin embedding example for the forge build engine.
//!
//! Assembles a small demonstration script (a phony `all` target that needs
//! every file matching a glob, plus a rule that builds them) and hands it to
//! `forge_engine::run`. Real embedders replace the script in [`demo_script`]
//! with their own rules; everything else here — option plumbing, exit codes —
//! is what any embedding binary needs.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

use anyhow::{Context as _, Result};
use clap::Parser;
use forge_core::{Level, Options};
use forge_engine::Context;
use forge_rules::{Fileset, Rule, ScriptBuilder, TargetPattern};
use std::path::PathBuf;
use std::sync::Arc;

/// Run a build script.
#[derive(Parser, Debug)]
#[command(name = "forge", version, about = "A programmable build-graph execution engine")]
struct Cli {
    /// Project root the build runs against
    #[arg(short = 'C', long = "directory", value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Number of rule actions allowed to run concurrently
    #[arg(short = 't', long, default_value_t = 4)]
    threads: usize,

    /// Targets to build; defaults to the script's own want list ("all")
    #[arg(long = "want", value_name = "TARGET")]
    want: Vec<String>,

    /// Console log verbosity
    #[arg(long, default_value = "normal")]
    console_level: Level,

    /// File log verbosity, only meaningful with --log-file
    #[arg(long, default_value = "chatty")]
    file_level: Level,

    /// Append a build log to this file in addition to the console
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Glob (relative to the project root) the demonstration rule matches
    #[arg(long, default_value = "*.txt")]
    pattern: String,

    /// Log failures instead of exiting non-zero
    #[arg(long)]
    keep_going: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let directory = cli
        .directory
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let project_root = std::fs::canonicalize(&directory)
        .with_context(|| format!("cannot resolve project root '{}'", directory.display()))?;

    let options = Options {
        project_root,
        threads: cli.threads,
        console_level: cli.console_level,
        file_level: cli.file_level,
        file_log_path: cli.log_file.clone(),
        want: cli.want.clone(),
        fail_on_error: !cli.keep_going,
    }
    .apply_env_overrides();

    let (options, registry, script_want) = demo_script(options, cli.pattern.clone());

    match forge_engine::run(options, registry, script_want, None).await {
        Ok(summary) => {
            tracing::info!(
                targets = summary.targets_requested,
                elapsed_secs = summary.elapsed_secs,
                "build finished"
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

/// A minimal script: `all` needs every file matching `pattern`, and the
/// matching rule just logs that it ran. Stand-in for a real embedder's rules.
fn demo_script(
    options: Options,
    pattern: String,
) -> (Options, forge_rules::RuleRegistry<Context>, Vec<String>) {
    let rule_pattern = pattern.clone();
    ScriptBuilder::new(options)
        .rule(Rule::new(
            TargetPattern::phony("all"),
            Arc::new(move |ctx: Context, _target| {
                let fileset = Fileset::new().with_pattern(pattern.clone());
                Box::pin(async move {
                    ctx.need_fileset(&fileset)
                        .await
                        .map_err(|e| forge_core::EngineError::Internal(e.to_string()))
                })
            }),
        ))
        .add_rule(
            rule_pattern,
            Arc::new(|ctx: Context, target| {
                Box::pin(async move {
                    ctx.log(Level::Normal, format!("building {target}"));
                    Ok(())
                })
            }),
        )
        .want(["all"])
        .build()
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
