// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A console sink: writes to stdout/stderr, filtered by verbosity.

use crate::logger::Logger;
use forge_core::Level;

/// Writes messages at or below a configured verbosity threshold to the
/// terminal. `Error` and `Warn` go to stderr; everything else goes to
/// stdout.
pub struct ConsoleSink {
    threshold: Level,
}

impl ConsoleSink {
    pub fn new(threshold: Level) -> Self {
        Self { threshold }
    }

    /// Whether a message at `level` would be written given this sink's
    /// threshold.
    pub fn accepts(&self, level: Level) -> bool {
        level.passes(self.threshold)
    }
}

impl Logger for ConsoleSink {
    fn log(&self, level: Level, message: &str) {
        if !self.accepts(level) {
            return;
        }
        match level {
            Level::Error | Level::Warn => eprintln!("{message}"),
            _ => println!("{message}"),
        }
    }
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
