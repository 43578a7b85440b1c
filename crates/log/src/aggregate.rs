// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The aggregate logger: fans a single `log` call out to every configured
//! sink, each filtering by its own verbosity threshold.

use crate::console::ConsoleSink;
use crate::file::FileSink;
use crate::logger::Logger;
use forge_core::Level;
use std::sync::Arc;

/// Console (always present) plus an optional file sink and an optional
/// caller-supplied custom sink.
///
/// This is the collaborator the engine writes all build messages to; it is
/// not a `Logger` of any particular destination itself.
pub struct AggregateLogger {
    console: ConsoleSink,
    file: Option<FileSink>,
    custom: Option<Arc<dyn Logger>>,
}

impl AggregateLogger {
    pub fn new(console_level: Level) -> Self {
        Self {
            console: ConsoleSink::new(console_level),
            file: None,
            custom: None,
        }
    }

    pub fn with_file(mut self, file: FileSink) -> Self {
        self.file = Some(file);
        self
    }

    pub fn with_custom(mut self, custom: Arc<dyn Logger>) -> Self {
        self.custom = Some(custom);
        self
    }

    pub fn log(&self, level: Level, message: &str) {
        self.console.log(level, message);
        if let Some(file) = &self.file {
            file.log(level, message);
        }
        if let Some(custom) = &self.custom {
            custom.log(level, message);
        }
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
