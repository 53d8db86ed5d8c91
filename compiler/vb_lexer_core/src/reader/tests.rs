#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;

fn texts(source: &str) -> Vec<(&str, u32)> {
    read_statements(source)
        .unwrap()
        .into_iter()
        .map(|s| (s.text, s.line))
        .collect()
}

// === Statements ===

#[test]
fn one_statement_per_line() {
    assert_eq!(
        texts("a = b;\nc = d;\n"),
        vec![("a = b;", 1), ("c = d;", 2)]
    );
}

#[test]
fn statement_spanning_lines_keeps_first_line() {
    assert_eq!(
        texts("x;\nc = a\n  b;\nd;"),
        vec![("x;", 1), ("c = a\n  b;", 2), ("d;", 4)]
    );
}

#[test]
fn blank_lines_become_blank_statements() {
    let statements = read_statements("a;\n\n   \nb;").unwrap();
    let blanks: Vec<(bool, u32)> = statements.iter().map(|s| (s.is_blank(), s.line)).collect();
    assert_eq!(blanks, vec![(false, 1), (true, 2), (true, 3), (false, 4)]);
}

#[test]
fn crlf_lines() {
    assert_eq!(texts("a;\r\nb;\r\n"), vec![("a;", 1), ("b;", 2)]);
}

#[test]
fn bom_is_ignored() {
    assert_eq!(texts("\u{feff}a;"), vec![("a;", 1)]);
}

#[test]
fn semicolon_inside_comment_does_not_terminate() {
    assert_eq!(
        texts("\"first; second\";\na;"),
        vec![("\"first; second\";", 1), ("a;", 2)]
    );
}

#[test]
fn trailing_whitespace_after_terminator_is_fine() {
    assert_eq!(texts("a;  \t\nb;"), vec![("a;", 1), ("b;", 2)]);
}

#[test]
fn trailing_blank_text_at_eof_is_dropped() {
    assert_eq!(texts("a;\n   "), vec![("a;", 1)]);
    assert_eq!(texts(""), vec![]);
}

// === Errors ===

#[test]
fn two_statements_on_one_line() {
    let err = read_statements("ok;\na = b; c = d;").unwrap_err();
    assert_eq!(
        err,
        ReadError {
            kind: ReadErrorKind::TrailingText,
            line: 2,
        }
    );
    assert_eq!(err.to_string(), "2: Only one statement can be on a line.");
}

#[test]
fn unterminated_statement_reports_its_start() {
    let err = read_statements("a;\n\nb = c\n d").unwrap_err();
    assert_eq!(
        err,
        ReadError {
            kind: ReadErrorKind::Unterminated,
            line: 3,
        }
    );
}
