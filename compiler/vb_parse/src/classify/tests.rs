#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Tests use unwrap/expect for brevity"
)]

use pretty_assertions::assert_eq;
use vb_diagnostic::ErrorCode;

use super::*;

fn classify_in(namespace: &mut Namespace, text: &str) -> Result<StatementKind, Diagnostic> {
    let statement = SourceStatement { text, line: 1 };
    classify(&statement, "design", namespace).map(|classified| classified.kind)
}

fn kind_of(text: &str) -> StatementKind {
    classify_in(&mut Namespace::new(), text).unwrap()
}

fn error_of(text: &str) -> Diagnostic {
    classify_in(&mut Namespace::new(), text).unwrap_err()
}

fn code_of(text: &str) -> ErrorCode {
    error_of(text).code
}

// === Kinds ===

#[test]
fn statement_kinds() {
    let cases = [
        ("a = b c;", StatementKind::Boolean),
        ("q <= q + 1;", StatementKind::Clock),
        ("q <=@clk d;", StatementKind::Clock),
        ("a b *c;", StatementKind::VariableList),
        ("{a b} c[1..0];", StatementKind::VariableList),
        ("%h{a[3..0]} %b{b c};", StatementKind::FormatSpecifier),
        ("\"hello; world\";", StatementKind::Comment),
        ("  -\"hidden\";", StatementKind::Comment),
        ("#library lib;", StatementKind::Library),
        ("   ", StatementKind::Empty),
        ("design(a b : c);", StatementKind::Module),
        ("adder.u1(a, b : c);", StatementKind::Submodule),
        ("a = ~b ~(c | d);", StatementKind::Boolean),
        ("a = {b 1'b1} == 2'b10;", StatementKind::Boolean),
    ];
    for (text, expected) in cases {
        assert_eq!(kind_of(text), expected, "{text}");
    }
}

#[test]
fn design_name_without_paren_is_a_scalar() {
    assert_eq!(kind_of("design = a;"), StatementKind::Boolean);
    assert_eq!(code_of("design (a : b);"), ErrorCode::E1001);
}

#[test]
fn classified_keeps_text_and_line() {
    let statement = SourceStatement {
        text: "a = b;",
        line: 7,
    };
    let classified = classify(&statement, "design", &mut Namespace::new()).unwrap();
    assert_eq!(
        classified,
        Classified {
            kind: StatementKind::Boolean,
            text: "a = b;",
            line: 7,
        }
    );
}

// === Syntax errors ===

#[test]
fn assignment_errors() {
    assert_eq!(code_of("a b = c;"), ErrorCode::E1006);
    assert_eq!(code_of("= a;"), ErrorCode::E1006);
    assert_eq!(code_of("a = ;"), ErrorCode::E1006);
    assert_eq!(code_of("a = b | ;"), ErrorCode::E1006);
    assert_eq!(code_of("a = b = c;"), ErrorCode::E1003);
    assert_eq!(code_of("1 = a;"), ErrorCode::E1010);
    assert_eq!(code_of("{a = b};"), ErrorCode::E1001);
}

#[test]
fn assignment_messages() {
    assert_eq!(error_of("a = ;").message, "'=' must be followed by an expression.");
    assert_eq!(error_of("a = b | ;").message, "'|' must be between two operands.");
    assert_eq!(
        error_of("1 <= a;").message,
        "Constants can't be used on the left side of a clock statement."
    );
}

#[test]
fn operator_placement() {
    assert_eq!(code_of("a | b;"), ErrorCode::E1001);
    assert_eq!(code_of("a = {b | c};"), ErrorCode::E1001);
    assert_eq!(code_of("a (b);"), ErrorCode::E1001);
    assert_eq!(code_of("a = b + c | d;"), ErrorCode::E1007);
    assert_eq!(code_of("a = (b) + c;"), ErrorCode::E1007);
    assert_eq!(code_of("a = b ~(c) + d;"), ErrorCode::E1007);
}

#[test]
fn negation_rules() {
    assert_eq!(code_of("~a = b;"), ErrorCode::E1004);
    assert_eq!(code_of("a ~b;"), ErrorCode::E1004);
    assert_eq!(code_of("a = {~b c};"), ErrorCode::E1004);
    assert_eq!(code_of("a = ~ (b);"), ErrorCode::E1004);
    assert_eq!(code_of("a = ~b ~;"), ErrorCode::E1004);
    assert_eq!(code_of("a = ~ {b c};"), ErrorCode::E1004);
}

#[test]
fn negation_attaches_to_groups() {
    assert_eq!(kind_of("x = ~(a b);"), StatementKind::Boolean);
    assert_eq!(kind_of("x[1..0] = ~{a b};"), StatementKind::Boolean);
    assert_eq!(kind_of("{x y} <= ~{a b};"), StatementKind::Clock);
}

#[test]
fn star_rules() {
    assert_eq!(code_of("a = *b;"), ErrorCode::E1005);
    assert_eq!(code_of("*a = b;"), ErrorCode::E1005);
    assert_eq!(code_of("%h{*a};"), ErrorCode::E1005);
}

#[test]
fn separators_outside_modules() {
    assert_eq!(code_of("a, b;"), ErrorCode::E1002);
    assert_eq!(code_of("a : b;"), ErrorCode::E1002);
}

#[test]
fn module_statements() {
    assert_eq!(code_of("adder.u1(a b);"), ErrorCode::E1002);
    assert_eq!(code_of("design(a : b : c);"), ErrorCode::E1002);
    assert_eq!(code_of("adder.u1(a : b) c;"), ErrorCode::E1008);
    assert_eq!(code_of("a adder.u1(b : c);"), ErrorCode::E1008);
    assert_eq!(code_of("adder.u1 (a : b);"), ErrorCode::E1008);
    assert_eq!(code_of("adder.u1(a : 1);"), ErrorCode::E1010);
    assert_eq!(code_of("design(a 1 : b);"), ErrorCode::E1010);
    assert_eq!(
        error_of("adder.u1(a : b) c;").message,
        "Invalid module instantiation."
    );
}

#[test]
fn format_specifier_rules() {
    assert_eq!(code_of("%h{a} b;"), ErrorCode::E1009);
    assert_eq!(code_of("a %h{b};"), ErrorCode::E1009);
    assert_eq!(code_of("a = %h{b};"), ErrorCode::E1009);
    assert_eq!(code_of("%h a;"), ErrorCode::E1009);
}

#[test]
fn constant_rules() {
    assert_eq!(code_of("a = {b 1};"), ErrorCode::E1010);
    assert_eq!(code_of("a = 4'b10000;"), ErrorCode::E2003);
    assert_eq!(code_of("a = 33'h0;"), ErrorCode::E2003);
    assert_eq!(kind_of("a = 4'b0001;"), StatementKind::Boolean);
    assert_eq!(kind_of("a[3..0] = 4'b00001;"), StatementKind::Boolean);
    assert_eq!(
        error_of("a = 2'd5;").message,
        "Constant '2'd5' needs more than 2 bits."
    );
}

// === Lexical errors ===

#[test]
fn grouping_errors() {
    assert_eq!(code_of("a = b);"), ErrorCode::E0002);
    assert_eq!(code_of("a = (b;"), ErrorCode::E0002);
    assert_eq!(code_of("a = (b};"), ErrorCode::E0002);
    assert_eq!(code_of("a {b {c}};"), ErrorCode::E0003);
    assert_eq!(code_of("a = {b (c)};"), ErrorCode::E0003);
    assert_eq!(
        error_of("a = (b};").message,
        "'}' cannot be matched. '(' must be matched first."
    );
}

#[test]
fn invalid_pieces() {
    assert_eq!(code_of("a = b#;"), ErrorCode::E0001);
    assert_eq!(code_of("a = b@c;"), ErrorCode::E0006);
    assert_eq!(code_of("a = b ; c;"), ErrorCode::E0004);
}

#[test]
fn errors_report_the_line_of_the_offending_piece() {
    let statement = SourceStatement {
        text: "a =\n  b |\n  ;",
        line: 4,
    };
    let err = classify(&statement, "design", &mut Namespace::new()).unwrap_err();
    assert_eq!(err.line, Some(6));
}

// === Namespace ===

#[test]
fn namespace_conflicts_across_statements() {
    let mut namespace = Namespace::new();
    classify_in(&mut namespace, "a;").unwrap();
    let err = classify_in(&mut namespace, "b = a[1..0];").unwrap_err();
    assert_eq!(err.code, ErrorCode::E2001);
    assert_eq!(err.message, "Namespace 'a' is already being used by a scalar.");

    let mut namespace = Namespace::new();
    classify_in(&mut namespace, "a[1..0];").unwrap();
    assert_eq!(classify_in(&mut namespace, "a;").unwrap_err().code, ErrorCode::E2001);
    assert_eq!(classify_in(&mut namespace, "b = a3;").unwrap(), StatementKind::Boolean);
    assert_eq!(namespace.components("a").unwrap(), vec!["a3", "a1", "a0"]);
}

#[test]
fn alt_clock_claims_a_scalar() {
    let mut namespace = Namespace::new();
    classify_in(&mut namespace, "q <=@clk d;").unwrap();
    assert_eq!(namespace.entry("clk"), Some(&NamespaceEntry::Scalar));
}

#[test]
fn bit_and_bound_limits() {
    assert_eq!(code_of("a40;"), ErrorCode::E2002);
    assert_eq!(code_of("a[40..0];"), ErrorCode::E2002);
    assert_eq!(code_of("a[0.0.4];"), ErrorCode::E2002);
    assert_eq!(code_of("a1[1..0];"), ErrorCode::E2001);
    assert_eq!(kind_of("a b[];"), StatementKind::VariableList);
}

// === Statement-level forms ===

#[test]
fn comment_parts_split() {
    assert_eq!(
        comment_parts("  +\"Shown text\";"),
        Some(CommentParts {
            visibility: CommentVisibility::Shown,
            spacing: "  ",
            text: "Shown text",
        })
    );
    assert_eq!(
        comment_parts("\"sim\";").map(|parts| parts.visibility),
        Some(CommentVisibility::Simulation)
    );
    assert_eq!(
        comment_parts("-\"x\";").map(|parts| parts.visibility),
        Some(CommentVisibility::Hidden)
    );
    assert_eq!(comment_parts("a = b;"), None);
    assert_eq!(comment_parts("\"open;"), None);
}

#[test]
fn library_path_forms() {
    assert_eq!(library_path("#library ../lib;"), Some("../lib"));
    assert_eq!(library_path("  #library   lib ;"), Some("lib"));
    assert_eq!(library_path("#librarylib;"), None);
    assert_eq!(library_path("#library a b;"), None);
    assert_eq!(library_path("#library ;"), None);
}
