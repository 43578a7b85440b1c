// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::path::PathBuf;
use proptest::prelude::*;

fn matches(pattern: &str, path: &str) -> bool {
    CompiledGlob::compile(pattern)
        .expect("pattern should compile")
        .matches(&PathBuf::from(path))
}

#[yare::parameterized(
    literal_match = { "a.o", "a.o", true },
    literal_mismatch = { "a.o", "b.o", false },
    star_matches_stem = { "*.o", "a.o", true },
    star_does_not_cross_separator = { "*.o", "sub/a.o", false },
    star_requires_one_char = { "*.o", ".o", false },
    question_single_char = { "a?.o", "ab.o", true },
    question_rejects_two_chars = { "a?.o", "abc.o", false },
    double_star_crosses_dirs = { "**/a.o", "x/y/a.o", true },
    double_star_matches_zero_dirs = { "**/a.o", "a.o", true },
    double_star_in_middle = { "src/**/mod.rs", "src/a/b/mod.rs", true },
    dot_is_literal = { "a.o", "aXo", false },
    backslash_separator_in_pattern = { "sub\\a.o", "sub/a.o", true },
)]
fn glob_matching(pattern: &str, path: &str, expected: bool) {
    assert_eq!(matches(pattern, path), expected);
}

#[test]
fn invalid_regex_metachar_still_compiles_because_escaped() {
    // '(' has no glob meaning and must be treated literally.
    assert!(matches("a(1).o", "a(1).o"));
}

proptest! {
    #[test]
    fn literal_pattern_matches_only_itself_among_distinct_literals(
        a in "[a-z]{1,8}",
        b in "[a-z]{1,8}",
    ) {
        prop_assume!(a != b);
        let glob = CompiledGlob::compile(&a).expect("compiles");
        prop_assert!(glob.matches(&PathBuf::from(&a)));
        prop_assert!(!glob.matches(&PathBuf::from(&b)));
    }
}
