// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A file sink: append-only, timestamped, filtered by verbosity.

use crate::logger::Logger;
use forge_core::{time_fmt::format_utc_now, Level};
use parking_lot::Mutex;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends timestamped lines to a single log file.
///
/// Each call opens, writes, and closes the file — safe for the write
/// frequency of a build log, and avoids holding a file handle open across
/// the lifetime of a run. The open-write-close sequence is guarded by a
/// mutex so concurrent callers (one per running rule action) never
/// interleave their lines.
pub struct FileSink {
    path: PathBuf,
    threshold: Level,
    write_lock: Mutex<()>,
}

impl FileSink {
    pub fn new(path: PathBuf, threshold: Level) -> Self {
        Self {
            path,
            threshold,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn accepts(&self, level: Level) -> bool {
        level.passes(self.threshold)
    }

    fn write_line(&self, level: Level, message: &str) -> std::io::Result<()> {
        let _guard = self.write_lock.lock();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let ts = format_utc_now();
        writeln!(file, "{ts} [{level}] {message}")
    }
}

impl Logger for FileSink {
    fn log(&self, level: Level, message: &str) {
        if !self.accepts(level) {
            return;
        }
        if let Err(e) = self.write_line(level, message) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write build log line");
        }
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
