// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build-log verbosity levels, ascending.

use serde::{Deserialize, Serialize};

/// Verbosity of a build-log line, ascending from least to most chatty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Error,
    Warn,
    Message,
    Command,
    Normal,
    Verbose,
    Chatty,
}

impl Level {
    /// Whether a line at `self` should be emitted to a sink filtering at `threshold`.
    pub fn passes(self, threshold: Level) -> bool {
        self <= threshold
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Message => "message",
            Level::Command => "command",
            Level::Normal => "normal",
            Level::Verbose => "verbose",
            Level::Chatty => "chatty",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Level::Error),
            "warn" => Ok(Level::Warn),
            "message" => Ok(Level::Message),
            "command" => Ok(Level::Command),
            "normal" => Ok(Level::Normal),
            "verbose" => Ok(Level::Verbose),
            "chatty" => Ok(Level::Chatty),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

#[cfg(test)]
#[path = "level_tests.rs"]
mod tests;
