#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Tests use unwrap/expect for brevity"
)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use vb_diagnostic::ErrorCode;
use vb_lexer_core::read_statements;

use super::*;
use crate::classify;

/// Classify a whole design, then expand every statement in order.
fn expand_source(source: &str) -> Result<Vec<String>, Diagnostic> {
    let statements = read_statements(source).unwrap();
    let mut namespace = Namespace::new();
    let classified: Vec<_> = statements
        .iter()
        .map(|statement| classify(statement, "design", &mut namespace).unwrap())
        .collect();
    let mut expander = Expander::new();
    let mut texts = Vec::new();
    for statement in &classified {
        for expanded in expander.expand(statement, &namespace)? {
            texts.push(expanded.text);
        }
    }
    Ok(texts)
}

fn expand_one(source: &str) -> Vec<String> {
    expand_source(source).unwrap()
}

fn components(token: &str) -> Vec<String> {
    Expander::new()
        .components(token, &Namespace::new(), 1)
        .unwrap()
        .unwrap()
}

// === Components ===

#[test]
fn vector_components() {
    assert_eq!(components("n[0..3]"), vec!["n0", "n1", "n2", "n3"]);
    assert_eq!(components("n[3..0]"), vec!["n3", "n2", "n1", "n0"]);
    assert_eq!(components("n[0.2.6]"), vec!["n0", "n2", "n4", "n6"]);
    assert_eq!(components("~n[1..0]"), vec!["~n1", "~n0"]);
}

#[test]
fn constant_components() {
    assert_eq!(components("4'b101"), vec!["0", "1", "0", "1"]);
    assert_eq!(components("'hF"), vec!["1", "1", "1", "1"]);
    assert_eq!(components("5"), vec!["1", "0", "1"]);
    assert_eq!(components("~2'b01"), vec!["~0", "~1"]);
}

#[test]
fn scalars_have_no_components() {
    let found = Expander::new().components("a3", &Namespace::new(), 1).unwrap();
    assert_eq!(found, None);
}

#[test]
fn empty_vector_resolves_through_namespace() {
    assert_eq!(
        expand_one("a[1..0];\n%b{a[]};\n"),
        vec!["a1 a0", "%b{a1 a0}"]
    );
    let err = expand_source("x = a[];").unwrap_err();
    assert_eq!(err.code, ErrorCode::E2011);
}

// === Vertical ===

#[test]
fn vertical_assignment() {
    assert_eq!(
        expand_one("q[1..0] = a[1..0] b;"),
        vec!["q1 = a1 b", "q0 = a0 b"]
    );
    assert_eq!(
        expand_one("s[1..0] = ~a[1..0] | b[1..0];"),
        vec!["s1 = ~a1 | b1", "s0 = ~a0 | b0"]
    );
}

#[test]
fn vertical_keeps_leading_whitespace() {
    assert_eq!(
        expand_one("  q[1..0] = a[1..0];"),
        vec!["  q1 = a1", "  q0 = a0"]
    );
}

#[test]
fn vertical_concatenations() {
    assert_eq!(expand_one("{x y} = {a b};"), vec!["x = a", "y = b"]);
    assert_eq!(
        expand_one("{x y} <= {a 1'b0};"),
        vec!["x <= a", "y <= 0"]
    );
}

#[test]
fn negated_concatenation_spreads_over_its_members() {
    assert_eq!(
        expand_one("x[1..0] = ~{a b};"),
        vec!["x1 = ~a", "x0 = ~b"]
    );
    assert_eq!(expand_one("{x y} = ~{a b};"), vec!["x = ~a", "y = ~b"]);
}

#[test]
fn bare_constants_are_padded() {
    assert_eq!(
        expand_one("q[2..0] = 1;"),
        vec!["q2 = 0", "q1 = 0", "q0 = 1"]
    );
    assert_eq!(expand_one("q[1..0] = 'h1;"), vec!["q1 = 0", "q0 = 1"]);
}

#[test]
fn vertical_count_mismatch() {
    let err = expand_source("Q[0..1] = 1'b1;").unwrap_err();
    assert_eq!(err.code, ErrorCode::E2004);
    assert_eq!(
        err.message,
        "Expansion count of '1'b1' doesn't equal the expansion count of 'Q[0..1]'."
    );

    let err = expand_source("Q[0..1] = {a};").unwrap_err();
    assert_eq!(err.code, ErrorCode::E2004);

    let err = expand_source("q = a[1..0];").unwrap_err();
    assert_eq!(
        err.message,
        "Expansion count of 'a[1..0]' doesn't equal the expansion count of 'q'."
    );
}

// === Horizontal ===

#[test]
fn math_statements_wrap_operand_runs() {
    assert_eq!(
        expand_one("q[3..0] <= q[3..0] + 1;"),
        vec!["{q3 q2 q1 q0} <= {q3 q2 q1 q0} + 1"]
    );
    assert_eq!(
        expand_one("s[2..0] = a[1..0] - 5;"),
        vec!["{s2 s1 s0} = {a1 a0} - {1 0 1}"]
    );
}

#[test]
fn lists_flatten_concatenations() {
    assert_eq!(expand_one("{a b} c[1..0];"), vec!["a b c1 c0"]);
    assert_eq!(
        expand_one("%h{a[3..0]} %b{b c};"),
        vec!["%h{a3 a2 a1 a0} %b{b c}"]
    );
}

#[test]
fn module_statements_expand_parameters() {
    assert_eq!(expand_one("design(a[1..0] : s);"), vec!["design(a1 a0 : s)"]);
    assert_eq!(
        expand_one("adder.u1({x y}, 4'b0011 : s[1..0]);"),
        vec!["adder.u1({x y}, 0 0 1 1 : s1 s0)"]
    );
}

#[test]
fn unexpanded_statements_pass_through() {
    assert_eq!(expand_one("a = ~~b;"), vec!["a = b"]);
    assert_eq!(expand_one("a = b c;"), vec!["a = b c"]);
    assert_eq!(expand_one("\"note\";"), vec!["\"note\""]);
    assert_eq!(expand_one("a b;\n\nc;"), vec!["a b", "", "c"]);
}

#[test]
fn expanded_statements_keep_kind_and_line() {
    let statements = read_statements("\n\nq[1..0] = a[1..0];").unwrap();
    let mut namespace = Namespace::new();
    let classified = classify(&statements[2], "design", &mut namespace).unwrap();
    let expanded = Expander::new().expand(&classified, &namespace).unwrap();
    assert_eq!(expanded.len(), 2);
    assert!(expanded
        .iter()
        .all(|e| e.kind == StatementKind::Boolean && e.line == 3));
}

proptest! {
    #[test]
    fn expansion_is_memoized(left in 0u32..32, right in 0u32..32) {
        let token = format!("v[{left}..{right}]");
        let mut expander = Expander::new();
        let namespace = Namespace::new();
        let first = expander.components(&token, &namespace, 1).unwrap();
        let second = expander.components(&token, &namespace, 1).unwrap();
        prop_assert_eq!(&first, &second);
        let count = first.map(|c| c.len()).unwrap_or_default();
        prop_assert_eq!(u32::try_from(count).unwrap(), left.abs_diff(right) + 1);
    }
}
