//! Output tokens handed to a renderer.
//!
//! Each evaluation returns a flat token stream for the whole design. Layout
//! (spacing and line breaks) is carried in the stream itself, so a renderer
//! only has to draw tokens in order.

use std::fmt;

use crate::VariableKind;

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum OutputToken {
    /// A variable reference. For `~a`, `name` is `a` and `value` is the
    /// value after negation.
    Variable {
        name: String,
        value: bool,
        negated: bool,
        kind: VariableKind,
    },
    Constant {
        text: String,
        value: bool,
    },
    Operator(String),
    /// `(` or `)` of an expression group, carrying the group's value.
    Parenthesis {
        text: char,
        value: bool,
    },
    /// `;`, `,`, `:`, `{`, `}` and the `)` of module statements.
    Punctuation(String),
    Spacing(usize),
    LineBreak,
    Comment(String),
    /// A format specifier's rendered value.
    Formatter {
        display: String,
        /// Member bits, most significant first.
        variables: Vec<String>,
        /// Binary text of the value a click moves to. Only offered when
        /// every member is an independent variable.
        next_value: Option<String>,
    },
    /// `design.instance(` of an instantiation, `name(` of a declaration.
    Instantiation(String),
}

impl OutputToken {
    /// Value shown with the token, for tokens that carry one.
    pub fn value(&self) -> Option<bool> {
        match self {
            OutputToken::Variable { value, .. }
            | OutputToken::Constant { value, .. }
            | OutputToken::Parenthesis { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// `true` for a variable the user can click.
    pub fn is_clickable(&self) -> bool {
        matches!(
            self,
            OutputToken::Variable {
                kind: VariableKind::Independent,
                ..
            }
        )
    }
}

impl fmt::Display for OutputToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputToken::Variable {
                name,
                value,
                negated,
                ..
            } => {
                let tilde = if *negated { "~" } else { "" };
                write!(f, "{tilde}{name}={}", u8::from(*value))
            }
            OutputToken::Constant { text, .. } => f.write_str(text),
            OutputToken::Operator(text)
            | OutputToken::Punctuation(text)
            | OutputToken::Comment(text)
            | OutputToken::Instantiation(text) => f.write_str(text),
            OutputToken::Parenthesis { text, .. } => write!(f, "{text}"),
            OutputToken::Spacing(width) => write!(f, "{:width$}", ""),
            OutputToken::LineBreak => f.write_str("\n"),
            OutputToken::Formatter { display, .. } => f.write_str(display),
        }
    }
}

/// Plain-text rendering of a token stream.
pub fn render_tokens(tokens: &[OutputToken]) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for token in tokens {
        let _ = write!(out, "{token}");
    }
    out
}

#[cfg(test)]
mod tests;
