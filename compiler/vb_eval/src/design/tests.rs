#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Tests use unwrap/expect for brevity"
)]

use super::*;
use crate::render_tokens;
use pretty_assertions::assert_eq;
use vb_diagnostic::ErrorCode;

fn design(name: &str, source: &str) -> Design {
    Design::from_source(name, ".", source, Settings::default())
}

fn value(design: &Design, name: &str) -> bool {
    design.database().value(name).unwrap()
}

fn first_code(design: &Design) -> ErrorCode {
    design.diagnostics().next().unwrap().code
}

// === Full parse ===

#[test]
fn parse_renders_every_statement() {
    let mut d = design("top", "+\"shown\";\n-\"hidden\";\n\na;\n");
    let output = d.parse().unwrap();
    assert_eq!(render_tokens(&output), "shown\n\na=0;\n");
}

#[test]
fn starred_variables_start_high() {
    let mut d = design("top", "*a b;\nc = a | b;\n");
    let output = d.parse().unwrap();
    assert_eq!(render_tokens(&output), "a=1 b=0;\nc=1 = a=1 | b=0;\n");
}

#[test]
fn read_errors_abort_the_parse() {
    let mut d = design("top", "a = b; c = d;\n");
    assert!(d.parse().is_err());
    assert_eq!(d.error_lines(), ["1: Only one statement can be on a line."]);
    assert!(d.statements().is_empty());
}

#[test]
fn self_dependency_fails_initialization() {
    let mut d = design("top", "a = a;\n");
    assert!(d.parse().is_err());
    assert_eq!(d.error_lines(), ["1: 'a' cannot depend on itself."]);
}

#[test]
fn second_driver_is_rejected() {
    let mut d = design("top", "c = a;\nc = b;\n");
    assert!(d.parse().is_err());
    assert_eq!(
        d.error_lines(),
        ["2: 'c' is already assigned by another statement."]
    );
}

#[test]
fn vertical_arity_mismatch_is_reported() {
    let mut d = design("top", "q[0..1] = a[0..2];\n");
    assert!(d.parse().is_err());
    assert_eq!(first_code(&d), ErrorCode::E2004);
}

#[test]
fn cycles_settle_by_default_and_fail_with_full_detection() {
    let source = "a = b;\nb = a;\n";
    let mut relaxed = design("top", source);
    assert!(relaxed.parse().is_ok());

    let settings = Settings::default().with_cycle_detection(CycleDetection::Full);
    let mut strict = Design::from_source("top", ".", source, settings);
    assert!(strict.parse().is_err());
    assert_eq!(
        strict.error_lines(),
        ["1: 'a' has a circular dependency: a -> b -> a."]
    );
}

#[test]
fn negated_concatenation_assigns_each_bit() {
    let mut d = design("top", "*a b;\nx[1..0] = ~{a b};\n");
    d.parse().unwrap();
    assert!(!value(&d, "x1"));
    assert!(value(&d, "x0"));

    d.parse_click("a").unwrap();
    assert!(value(&d, "x1"));
}

#[test]
fn errors_are_collected_per_phase() {
    let mut d = design("top", "a = a;\nb = b;\n");
    assert!(d.parse().is_err());
    assert_eq!(d.diagnostics().count(), 2);
}

// === Interaction ===

#[test]
fn clicks_propagate_through_expressions() {
    let mut d = design("top", "a b;\nc = a b;\nd = ~c;\n");
    d.parse().unwrap();
    assert!(!value(&d, "c"));
    assert!(value(&d, "d"));

    d.parse_click("a").unwrap();
    assert!(!value(&d, "c"));
    d.parse_click("b").unwrap();
    assert!(value(&d, "c"));
    assert!(!value(&d, "d"));
}

#[test]
fn clicking_an_unknown_variable_fails() {
    let mut d = design("top", "a;\n");
    d.parse().unwrap();
    assert!(d.parse_click("zz").is_err());
    assert_eq!(d.error_lines(), ["'zz' is not an independent variable in this design."]);
}

#[test]
fn clicking_a_dependent_fails() {
    let mut d = design("top", "a;\nc = ~a;\n");
    d.parse().unwrap();
    assert!(d.parse_click("c").is_err());
    assert_eq!(first_code(&d), ErrorCode::E2011);
    assert!(value(&d, "c"));
}

#[test]
fn interaction_needs_a_successful_parse() {
    let mut fresh = design("top", "a;\n");
    assert!(fresh.parse_tick().is_err());
    assert_eq!(first_code(&fresh), ErrorCode::E2016);

    let mut d = design("top", "a b;\nc = a b;\nd = d;\n");
    assert!(d.parse().is_err());
    assert!(d.statements().is_empty());
    assert_eq!(d.database().value("a"), None);

    assert!(d.parse_click("a").is_err());
    assert_eq!(
        d.error_lines(),
        ["Design 'top' must be parsed before it can be simulated."]
    );
    assert!(d.tick_n(0).is_err());
    assert!(d.click_formatter(&["a".to_owned()], "1").is_err());
}

#[test]
fn registers_change_only_on_ticks() {
    let mut d = design("top", "x;\nq <= ~q;\n");
    d.parse().unwrap();
    assert!(!value(&d, "q"));

    d.parse_click("x").unwrap();
    assert!(!value(&d, "q"));

    d.parse_tick().unwrap();
    assert!(value(&d, "q"));
    d.parse_tick().unwrap();
    assert!(!value(&d, "q"));
}

#[test]
fn counter_wraps_at_its_width() {
    let mut d = design("top", "q[1..0] <= q[1..0] + 1;\n%u{q[1..0]};\n");
    d.parse().unwrap();

    let output = d.tick_n(3).unwrap();
    assert!(value(&d, "q1") && value(&d, "q0"));
    assert!(output.iter().any(|token| matches!(
        token,
        OutputToken::Formatter { display, .. } if display == "3"
    )));

    d.parse_tick().unwrap();
    assert!(!value(&d, "q1") && !value(&d, "q0"));
}

#[test]
fn alternate_clock_fires_on_its_rising_edge() {
    let mut d = design("top", "*d;\ngo;\nq <=@go d;\n");
    d.parse().unwrap();

    d.parse_tick().unwrap();
    assert!(!value(&d, "q"));

    d.parse_click("go").unwrap();
    assert!(value(&d, "q"));

    d.parse_click("d").unwrap();
    d.parse_click("go").unwrap();
    assert!(value(&d, "q"));
    d.parse_click("go").unwrap();
    assert!(!value(&d, "q"));
}

#[test]
fn formatter_click_sets_the_offered_value() {
    let mut d = design("top", "a[3..0];\n%h{a[3..0]};\n");
    let output = d.parse().unwrap();
    let Some(OutputToken::Formatter {
        display,
        variables,
        next_value: Some(next),
    }) = output
        .iter()
        .find(|token| matches!(token, OutputToken::Formatter { .. }))
        .cloned()
    else {
        panic!("no clickable formatter in {output:?}");
    };
    assert_eq!(display, "0");
    assert_eq!(next, "0001");

    let output = d.click_formatter(&variables, &next).unwrap();
    assert!(value(&d, "a0"));
    assert!(output.iter().any(|token| matches!(
        token,
        OutputToken::Formatter { display, .. } if display == "1"
    )));
}

#[test]
fn export_state_keeps_registration_order() {
    let mut d = design("top", "b a;\nc = a b;\n");
    d.parse().unwrap();
    let names: Vec<String> = d.export_state().into_iter().map(|v| v.name).collect();
    assert_eq!(names, ["b", "a", "c"]);
}

#[test]
fn parse_with_input_only_sets_independents() {
    let mut d = design("top", "a b;\nc = a b;\n");
    let inputs = [
        ("a".to_owned(), true),
        ("b".to_owned(), true),
        ("c".to_owned(), false),
        ("zz".to_owned(), true),
    ];
    d.parse_with_input(&inputs).unwrap();
    assert!(value(&d, "c"));
    assert_eq!(d.database().value("zz"), None);
}

#[test]
fn parse_with_input_does_not_fire_alternate_clocks() {
    let mut d = design("top", "clk d;\nq <=@clk ~d;\n");
    d.parse_with_input(&[("clk".to_owned(), true)]).unwrap();
    assert!(value(&d, "clk"));
    assert!(!value(&d, "q"));

    d.parse_click("clk").unwrap();
    assert!(!value(&d, "q"));
    d.parse_click("clk").unwrap();
    assert!(value(&d, "q"));
}

// === Modules ===

#[test]
fn parse_as_module_returns_declared_outputs() {
    let mut d = design("m", "m(a, b : c);\nc = a b;\n");
    assert_eq!(d.parse_as_module(&[true, true]).unwrap(), [true]);
    assert_eq!(d.parse_as_module(&[true, false]).unwrap(), [false]);
    assert_eq!(d.module_declaration(), Some("m(a, b : c)"));
}

#[test]
fn module_inputs_must_be_independent() {
    let mut d = design("m", "m(a : c);\na = b;\nc = a;\n");
    assert!(d.parse().is_err());
    assert_eq!(
        d.error_lines(),
        ["1: 'a' must be an independent variable to be used as an input in a module declaration statement."]
    );
}

#[test]
fn only_one_module_declaration() {
    let mut d = design("m", "m(a : c);\nm(b : d);\nc = a;\nd = b;\n");
    assert!(d.parse().is_err());
    assert_eq!(
        d.error_lines(),
        ["2: Designs can only have one module statement."]
    );
}

#[test]
fn parse_as_module_without_declaration_fails() {
    let mut d = design("m", "c = a;\n");
    assert!(d.parse_as_module(&[true]).is_err());
    assert_eq!(first_code(&d), ErrorCode::E2012);
}

#[test]
fn cannot_instantiate_the_current_design() {
    let mut d = design("top", "a;\ntop.u1(a : b);\n");
    assert!(d.parse().is_err());
    assert_eq!(
        d.error_lines(),
        ["2: You cannot instantiate from the current design."]
    );
}

#[test]
fn from_file_rejects_other_extensions() {
    let error = Design::from_file(Path::new("notes.txt"), Settings::default()).unwrap_err();
    assert!(matches!(error, DesignError::NotADesign { .. }));
    assert_eq!(error.to_diagnostic().code, ErrorCode::E3003);
}
