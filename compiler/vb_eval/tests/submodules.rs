// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Multi-file designs: instantiation, libraries and nested evaluation.
//!
//! Every test writes its `.vbi` files into a fresh temporary directory and
//! opens the top design from disk, the way the CLI does.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use vb_diagnostic::ErrorCode;
use vb_eval::{Design, OutputToken, Settings, VariableKind};

const AND2: &str = "m(in0, in1 : out0);\nout0 = in0 in1;\n";

fn write(dir: &Path, file: &str, source: &str) -> PathBuf {
    let path = dir.join(file);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, source).unwrap();
    path
}

fn open(dir: &TempDir, top: &str) -> Design {
    open_with(dir, top, Settings::default())
}

fn open_with(dir: &TempDir, top: &str, settings: Settings) -> Design {
    let path = write(dir.path(), "top.vbi", top);
    Design::from_file(&path, settings).unwrap()
}

fn value(design: &Design, name: &str) -> bool {
    design.database().value(name).unwrap()
}

#[test]
fn submodule_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "m.vbi", AND2);
    let mut top = open(&dir, "a b;\nm.u1(a, b : c);\n");

    let output = top.parse().unwrap();
    assert_eq!(output[5], OutputToken::Instantiation("m.u1(".into()));
    assert!(!value(&top, "c"));
    assert_eq!(
        top.database().variable("c").unwrap().kind,
        VariableKind::Dependent
    );

    top.parse_click("a").unwrap();
    assert!(!value(&top, "c"));
    top.parse_click("b").unwrap();
    assert!(value(&top, "c"));
}

#[test]
fn submodule_outputs_feed_parent_expressions() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "m.vbi", AND2);
    let mut top = open(&dir, "*a *b;\nm.u1(a, b : c);\nd = ~c;\n");

    top.parse().unwrap();
    assert!(value(&top, "c"));
    assert!(!value(&top, "d"));
}

#[test]
fn instances_do_not_share_state() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "m.vbi", AND2);
    let mut top = open(&dir, "a b e;\nm.u1(a, b : c);\nm.u2(a, e : d);\n");

    top.parse().unwrap();
    top.parse_click("a").unwrap();
    top.parse_click("e").unwrap();
    assert!(!value(&top, "c"));
    assert!(value(&top, "d"));
}

#[test]
fn vector_ports_expand_per_bit() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "add.vbi",
        "add(a[1..0], b[1..0] : s[1..0]);\ns[1..0] = a[1..0] + b[1..0];\n",
    );
    let mut top = open(&dir, "x[1..0] y[1..0];\nadd.u1(x[1..0], y[1..0] : z[1..0]);\n");

    top.parse().unwrap();
    top.parse_click("x0").unwrap();
    top.parse_click("y0").unwrap();
    assert!(value(&top, "z1"));
    assert!(!value(&top, "z0"));
}

#[test]
fn no_contact_outputs_are_recorded_but_not_written() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "h.vbi", "h(x : s, c);\ns = ~x;\nc = x;\n");
    let mut top = open(&dir, "x;\nh.u1(x : NC, y);\n");

    let output = top.parse().unwrap();
    assert_eq!(top.database().value("NC"), None);
    assert!(output.contains(&OutputToken::Variable {
        name: "NC".into(),
        value: true,
        negated: false,
        kind: VariableKind::Dependent,
    }));
    assert!(!value(&top, "y"));
}

#[test]
fn module_inputs_follow_the_child_declaration() {
    let dir = tempfile::tempdir().unwrap();
    let child = write(dir.path(), "m.vbi", AND2);
    let mut top = open(&dir, "a b;\nm.u1(a, b : c);\n");
    top.parse().unwrap();
    top.parse_click("a").unwrap();

    let inputs = top.module_inputs("u1").unwrap();
    assert_eq!(
        inputs,
        [("in0".to_owned(), true), ("in1".to_owned(), false)]
    );
    assert_eq!(top.module_inputs("u9"), None);
    assert_eq!(top.subdesign_path("m"), Some(child.as_path()));

    let mut opened = Design::from_file(&child, Settings::default()).unwrap();
    opened.parse_with_input(&inputs).unwrap();
    assert!(value(&opened, "in0"));
    assert!(!value(&opened, "out0"));
}

#[test]
fn libraries_extend_the_search_path() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "lib/m.vbi", AND2);
    let mut top = open(&dir, "#library lib;\n*a *b;\nm.u1(a, b : c);\n");

    top.parse().unwrap();
    assert!(value(&top, "c"));
}

#[test]
fn missing_library_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut top = open(&dir, "#library nowhere;\na;\n");

    assert!(top.parse().is_err());
    assert_eq!(
        top.error_lines(),
        ["1: Library 'nowhere' doesn't exist or is invalid."]
    );
}

#[test]
fn missing_design_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut top = open(&dir, "a;\nnope.u1(a : b);\n");

    assert!(top.parse().is_err());
    assert_eq!(
        top.error_lines(),
        ["2: Unable to find a design named 'nope' with a module declaration."]
    );
}

#[test]
fn design_without_declaration_cannot_be_instantiated() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "m.vbi", "out0 = in0 in1;\n");
    let mut top = open(&dir, "a b;\nm.u1(a, b : c);\n");

    assert!(top.parse().is_err());
    assert_eq!(
        top.diagnostics().next().unwrap().code,
        ErrorCode::E3002
    );
}

#[test]
fn arity_must_match_the_declaration() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "m.vbi", AND2);
    let mut top = open(&dir, "a;\nm.u1(a : c);\n");

    assert!(top.parse().is_err());
    assert_eq!(
        top.error_lines(),
        ["2: Instantiation doesn't have the same number of input/output variables as the matching module declaration."]
    );
}

#[test]
fn instance_names_are_unique() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "m.vbi", AND2);
    let mut top = open(&dir, "a b;\nm.u1(a, b : c);\nm.u1(a, b : d);\n");

    assert!(top.parse().is_err());
    assert_eq!(
        top.error_lines(),
        ["3: Instantiation name 'u1' is already being used."]
    );
}

#[test]
fn child_failures_propagate_with_a_note() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "m.vbi", "m(in0, in1 : out0);\nout0 = out0 in0;\n");
    let mut top = open(&dir, "a b;\nm.u1(a, b : c);\n");

    assert!(top.parse().is_err());
    let first = top.diagnostics().next().unwrap();
    assert_eq!(first.code, ErrorCode::E2005);
    assert_eq!(first.notes, ["in design 'm'"]);
}

#[test]
fn indirect_recursion_hits_the_depth_limit() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.vbi", "a(x : y);\nb.u1(x : y);\n");
    write(dir.path(), "b.vbi", "b(x : y);\na.u1(x : y);\n");
    let settings = Settings::default().with_max_submodule_depth(4);
    let mut top = open_with(&dir, "p;\na.u1(p : q);\n", settings);

    assert!(top.parse().is_err());
    let nested = top
        .diagnostics()
        .find(|diagnostic| diagnostic.code == ErrorCode::E2013)
        .unwrap();
    assert_eq!(
        nested.message,
        "Submodule nesting exceeds the maximum depth of 4."
    );
    assert_eq!(nested.notes.len(), 4);
}
