// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The script builder: the DSL surface a host program uses to declare rules
//! and wants before handing the assembled script to the driver.

use crate::pattern::TargetPattern;
use crate::registry::RuleRegistry;
use crate::rule::{Action, Rule};
use forge_core::Options;

/// Accumulates a rule registry, a want list, and the run options, ready to
/// be handed to `forge-engine`'s driver.
///
/// File-rule and phony-rule declarations are idempotent on re-declaration of
/// the same pattern: the last action wins, but the position fixed at first
/// declaration survives, because this is backed by [`RuleRegistry`]'s
/// `IndexMap`.
pub struct ScriptBuilder<Ctx> {
    options: Options,
    registry: RuleRegistry<Ctx>,
    want: Vec<String>,
}

impl<Ctx> ScriptBuilder<Ctx> {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            registry: RuleRegistry::new(),
            want: Vec::new(),
        }
    }

    /// Declare a rule directly.
    pub fn rule(mut self, rule: Rule<Ctx>) -> Self {
        self.registry.insert(rule);
        self
    }

    /// Declare a file rule from a glob pattern and an action.
    pub fn add_rule(self, glob: impl Into<String>, action: Action<Ctx>) -> Self {
        self.rule(Rule::new(TargetPattern::file(glob), action))
    }

    /// Declare a phony rule.
    pub fn phony(self, name: impl Into<String>, action: Action<Ctx>) -> Self {
        self.rule(Rule::new(TargetPattern::phony(name), action))
    }

    /// Declare several rules at once, in order.
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule<Ctx>>) -> Self {
        for rule in rules {
            self.registry.insert(rule);
        }
        self
    }

    /// Append to the script's default want list.
    ///
    /// The script's own wants are only consulted by the driver when
    /// `options.want` is empty (an explicit `Options::want` always wins).
    pub fn want(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.want.extend(names.into_iter().map(Into::into));
        self
    }

    /// Replace the script's default want list outright.
    pub fn want_override(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.want = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Consume the builder, returning its parts for the driver to run.
    pub fn build(self) -> (Options, RuleRegistry<Ctx>, Vec<String>) {
        (self.options, self.registry, self.want)
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
