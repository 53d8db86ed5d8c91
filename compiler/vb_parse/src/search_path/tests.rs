#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Tests use unwrap/expect for brevity"
)]

use std::fs;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn missing_library_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut search = SearchPath::new(dir.path());
    let err = search.add_library("nowhere").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Library 'nowhere' doesn't exist or is invalid."
    );
    assert!(search.libraries().is_empty());
}

#[test]
fn file_is_not_a_library() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("lib"), "").unwrap();
    let mut search = SearchPath::new(dir.path());
    assert!(search.add_library("lib").is_err());
}

#[test]
fn libraries_are_deduplicated() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("lib")).unwrap();
    let mut search = SearchPath::new(dir.path());
    let first = search.add_library("lib").unwrap().to_path_buf();
    let second = search.add_library("lib").unwrap().to_path_buf();
    assert_eq!(first, second);
    assert_eq!(search.libraries().len(), 1);
}

#[test]
fn design_dir_wins_over_libraries() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("lib")).unwrap();
    fs::write(dir.path().join("adder.vbi"), "adder(a : s);").unwrap();
    fs::write(dir.path().join("lib").join("adder.vbi"), "adder(a : s);").unwrap();
    fs::write(dir.path().join("lib").join("mux.vbi"), "mux(a : s);").unwrap();

    let mut search = SearchPath::new(dir.path());
    search.add_library("lib").unwrap();

    assert_eq!(search.locate("adder"), Some(dir.path().join("adder.vbi")));
    assert_eq!(
        search.locate("mux"),
        Some(dir.path().join("lib").join("mux.vbi"))
    );
    assert_eq!(search.locate("alu"), None);
    assert_eq!(search.candidates("alu").count(), 2);
}
