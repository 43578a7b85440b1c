// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn file_target_joins_relative_name_to_root() {
    let root = Path::new("/proj");
    let t = Target::file(root, "out/a.o");
    assert_eq!(t, Target::File(PathBuf::from("/proj/out/a.o")));
}

#[test]
fn file_target_keeps_absolute_name_as_is() {
    let root = Path::new("/proj");
    let t = Target::file(root, "/elsewhere/a.o");
    assert_eq!(t, Target::File(PathBuf::from("/elsewhere/a.o")));
}

#[test]
fn phony_target_is_phony() {
    let t = Target::phony("all");
    assert!(t.is_phony());
}

#[test]
fn file_target_is_not_phony() {
    let t = Target::file(Path::new("/proj"), "a.o");
    assert!(!t.is_phony());
}

#[test]
fn display_name_for_phony_is_bare_name() {
    assert_eq!(Target::phony("all").display_name(), "all");
}

#[test]
fn display_name_for_file_is_path() {
    let t = Target::file(Path::new("/proj"), "a.o");
    assert_eq!(t.display_name(), "/proj/a.o");
}

#[test]
fn nonexistent_file_target_does_not_exist_on_disk() {
    let t = Target::file(Path::new("/proj"), "definitely-not-a-real-file-xyz");
    assert!(!t.exists_on_disk());
}

#[test]
fn phony_never_exists_on_disk() {
    assert!(!Target::phony("all").exists_on_disk());
}

#[test]
fn equality_is_tag_plus_payload() {
    assert_eq!(Target::phony("x"), Target::phony("x"));
    assert_ne!(Target::phony("x"), Target::file(Path::new("/p"), "x"));
}
