// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine configuration.

use crate::env;
use crate::error::EngineError;
use crate::level::Level;
use std::path::PathBuf;

/// Configuration for a single `run`.
///
/// Built by the script-builder surface, optionally overlaid with environment
/// variables via [`Options::apply_env_overrides`], and validated once at the
/// start of `run`.
#[derive(Debug, Clone)]
pub struct Options {
    pub project_root: PathBuf,
    pub threads: usize,
    pub console_level: Level,
    pub file_level: Level,
    pub file_log_path: Option<PathBuf>,
    pub want: Vec<String>,
    pub fail_on_error: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            threads: 4,
            console_level: Level::Normal,
            file_level: Level::Chatty,
            file_log_path: None,
            want: Vec::new(),
            fail_on_error: true,
        }
    }
}

impl Options {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Self::default()
        }
    }

    /// Overlay `FORGE_THREADS`, `FORGE_CONSOLE_LEVEL`, `FORGE_FILE_LEVEL`, and
    /// `FORGE_LOG_PATH` from the process environment on top of whatever the
    /// builder already set. Unset or unparsable variables leave the existing
    /// value untouched; reads are pure (no file I/O, unlike a dotenv overlay).
    pub fn apply_env_overrides(mut self) -> Self {
        if let Some(threads) = env::read_usize("FORGE_THREADS") {
            self.threads = threads;
        }
        if let Some(level) = env::read_level("FORGE_CONSOLE_LEVEL") {
            self.console_level = level;
        }
        if let Some(level) = env::read_level("FORGE_FILE_LEVEL") {
            self.file_level = level;
        }
        if let Some(path) = env::read_path("FORGE_LOG_PATH") {
            self.file_log_path = Some(path);
        }
        self
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.threads == 0 {
            return Err(EngineError::Config(
                "threads must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
