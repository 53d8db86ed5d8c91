use super::*;
use pretty_assertions::assert_eq;

fn var(name: &str, value: bool, negated: bool) -> OutputToken {
    OutputToken::Variable {
        name: name.into(),
        value,
        negated,
        kind: VariableKind::Independent,
    }
}

#[test]
fn renders_values_inline() {
    let tokens = [
        var("c", true, false),
        OutputToken::Spacing(1),
        OutputToken::Operator("=".into()),
        OutputToken::Spacing(1),
        var("a", false, true),
        OutputToken::Punctuation(";".into()),
        OutputToken::LineBreak,
    ];
    assert_eq!(render_tokens(&tokens), "c=1 = ~a=0;\n");
}

#[test]
fn value_only_on_valued_tokens() {
    assert_eq!(var("a", true, false).value(), Some(true));
    assert_eq!(
        OutputToken::Parenthesis {
            text: ')',
            value: false
        }
        .value(),
        Some(false)
    );
    assert_eq!(OutputToken::Operator("|".into()).value(), None);
    assert_eq!(OutputToken::Spacing(4).to_string(), "    ");
}

#[test]
fn only_independent_variables_are_clickable() {
    assert!(var("a", false, false).is_clickable());
    let dependent = OutputToken::Variable {
        name: "c".into(),
        value: false,
        negated: false,
        kind: VariableKind::Dependent,
    };
    assert!(!dependent.is_clickable());
}
