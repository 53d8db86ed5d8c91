//! Centralized diagnostic constructors for the front half of the pipeline.
//!
//! Every message the classifier, expander and search path can produce is
//! built here, so wording and error codes stay in one place.

use vb_diagnostic::{Diagnostic, ErrorCode};
use vb_lexer_core::{ReadError, ReadErrorKind};

use crate::NamespaceError;

fn error(code: ErrorCode, line: u32, message: String) -> Diagnostic {
    Diagnostic::error(code).with_message(message).at_line(line)
}

// Lexical Errors

/// Convert a statement reader failure.
#[cold]
pub fn read_error(err: &ReadError) -> Diagnostic {
    let code = match err.kind {
        ReadErrorKind::TrailingText => ErrorCode::E0004,
        ReadErrorKind::Unterminated => ErrorCode::E0005,
    };
    let message = match err.kind {
        ReadErrorKind::TrailingText => "Only one statement can be on a line.",
        ReadErrorKind::Unterminated => "Statement must end with ';'.",
    };
    error(code, err.line, message.to_owned())
}

#[cold]
pub fn invalid_character(line: u32, ch: &str) -> Diagnostic {
    let shown = if ch == "\0" { "\\0" } else { ch };
    error(ErrorCode::E0001, line, format!("Invalid character '{shown}'."))
}

#[cold]
pub fn unmatched_close(line: u32, close: char, open: Option<char>) -> Diagnostic {
    let message = match open {
        Some(open) => format!("'{close}' cannot be matched. '{open}' must be matched first."),
        None => format!("'{close}' cannot be matched."),
    };
    error(ErrorCode::E0002, line, message)
}

#[cold]
pub fn unclosed_group(line: u32, open: char) -> Diagnostic {
    error(ErrorCode::E0002, line, format!("'{open}' was not matched."))
}

#[cold]
pub fn nested_concat(line: u32) -> Diagnostic {
    error(
        ErrorCode::E0003,
        line,
        "Concatenations can't be used inside other concatenations.".to_owned(),
    )
}

#[cold]
pub fn paren_in_concat(line: u32) -> Diagnostic {
    error(
        ErrorCode::E0003,
        line,
        "Parenthesis can't be used inside concatenations.".to_owned(),
    )
}

#[cold]
pub fn misplaced_semicolon(line: u32) -> Diagnostic {
    error(
        ErrorCode::E0004,
        line,
        "';' can only be used to end a statement.".to_owned(),
    )
}

#[cold]
pub fn unrecognized_token(line: u32, text: &str) -> Diagnostic {
    error(ErrorCode::E0006, line, format!("'{text}' is not a valid token."))
}

// Syntax Errors

#[cold]
pub fn operator_in_concat(line: u32, op: &str) -> Diagnostic {
    error(
        ErrorCode::E1001,
        line,
        format!("'{op}' can't be used inside a concatenation."),
    )
}

#[cold]
pub fn operator_outside_expression(line: u32, op: &str) -> Diagnostic {
    error(
        ErrorCode::E1001,
        line,
        format!("'{op}' operator can only be used in a boolean or clock statement."),
    )
}

#[cold]
pub fn paren_in_list(line: u32, paren: char) -> Diagnostic {
    error(
        ErrorCode::E1001,
        line,
        format!("'{paren}' can't be used in a format specifier or variable list statement."),
    )
}

#[cold]
pub fn comma_outside_module(line: u32) -> Diagnostic {
    error(
        ErrorCode::E1002,
        line,
        "',' can only be used inside the () in a submodule or module statement.".to_owned(),
    )
}

#[cold]
pub fn colon_outside_module(line: u32) -> Diagnostic {
    error(
        ErrorCode::E1002,
        line,
        "':' can only be used to separate input and output variables in a module or submodule statement."
            .to_owned(),
    )
}

#[cold]
pub fn repeated_colon(line: u32) -> Diagnostic {
    error(
        ErrorCode::E1002,
        line,
        "':' can only be used once in a module or submodule statement.".to_owned(),
    )
}

#[cold]
pub fn missing_colon(line: u32) -> Diagnostic {
    error(
        ErrorCode::E1002,
        line,
        "Module statements must separate inputs and outputs with ':'.".to_owned(),
    )
}

#[cold]
pub fn repeated_assignment(line: u32, op: &str) -> Diagnostic {
    error(
        ErrorCode::E1003,
        line,
        format!("'{op}' can only precede dependent(s) once in a statement."),
    )
}

#[cold]
pub fn negation_outside_rhs(line: u32) -> Diagnostic {
    error(
        ErrorCode::E1004,
        line,
        "'~' can only be used on the right side of a boolean or clock statement.".to_owned(),
    )
}

#[cold]
pub fn negation_in_concat(line: u32) -> Diagnostic {
    error(
        ErrorCode::E1004,
        line,
        "'~' can't be used inside a concatenation.".to_owned(),
    )
}

#[cold]
pub fn detached_negation(line: u32) -> Diagnostic {
    error(
        ErrorCode::E1004,
        line,
        "'~' must be attached to a scalar, vector, constant, parenthesis or concatenation."
            .to_owned(),
    )
}

#[cold]
pub fn star_on_rhs(line: u32) -> Diagnostic {
    error(
        ErrorCode::E1005,
        line,
        "'*' cannot be used on the right side of a boolean or clock statement.".to_owned(),
    )
}

#[cold]
pub fn star_with_assignment(line: u32, op: &str) -> Diagnostic {
    error(ErrorCode::E1005, line, format!("'{op}' cannot be used with '*'."))
}

#[cold]
pub fn star_outside_list(line: u32) -> Diagnostic {
    error(
        ErrorCode::E1005,
        line,
        "'*' can only be used in a variable list statement.".to_owned(),
    )
}

#[cold]
pub fn missing_dependent(line: u32, op: &str) -> Diagnostic {
    error(
        ErrorCode::E1006,
        line,
        format!("'{op}' can only be used after a dependent in boolean or clock statements."),
    )
}

#[cold]
pub fn multiple_dependents(line: u32) -> Diagnostic {
    error(
        ErrorCode::E1006,
        line,
        "In order to use multiple variables for a dependent, you must place the variables inside a concatenation."
            .to_owned(),
    )
}

#[cold]
pub fn missing_expression(line: u32, op: &str) -> Diagnostic {
    error(
        ErrorCode::E1006,
        line,
        format!("'{op}' must be followed by an expression."),
    )
}

#[cold]
pub fn dangling_operator(line: u32, op: &str) -> Diagnostic {
    error(
        ErrorCode::E1006,
        line,
        format!("'{op}' must be between two operands."),
    )
}

#[cold]
pub fn mixed_operators(line: u32) -> Diagnostic {
    error(
        ErrorCode::E1007,
        line,
        "Math operators (+ and -) cannot be used with boolean operators in a boolean or clock statement."
            .to_owned(),
    )
}

#[cold]
pub fn invalid_module_statement(line: u32, instantiation: bool) -> Diagnostic {
    let message = if instantiation {
        "Invalid module instantiation."
    } else {
        "Invalid module declaration."
    };
    error(ErrorCode::E1008, line, message.to_owned())
}

#[cold]
pub fn variable_outside_module(line: u32) -> Diagnostic {
    error(
        ErrorCode::E1008,
        line,
        "Variables or constants in module or submodule statements must be inside an instantiation or declaration."
            .to_owned(),
    )
}

#[cold]
pub fn formatter_in_formatter(line: u32) -> Diagnostic {
    error(
        ErrorCode::E1009,
        line,
        "Formatters can't be used inside other formatters.".to_owned(),
    )
}

#[cold]
pub fn formatter_outside_format(line: u32, formatter: &str) -> Diagnostic {
    error(
        ErrorCode::E1009,
        line,
        format!("'{formatter}' can only be used in a format specifier statement."),
    )
}

#[cold]
pub fn variable_outside_formatter(line: u32) -> Diagnostic {
    error(
        ErrorCode::E1009,
        line,
        "Variables or constants in a format specifier statement must be inside a format specifier."
            .to_owned(),
    )
}

#[cold]
pub fn formatter_without_concat(line: u32, formatter: &str) -> Diagnostic {
    error(
        ErrorCode::E1009,
        line,
        format!("'{formatter}' must be followed by a concatenation."),
    )
}

#[cold]
pub fn constant_dependent(line: u32, clock: bool) -> Diagnostic {
    let kind = if clock { "clock" } else { "boolean" };
    error(
        ErrorCode::E1010,
        line,
        format!("Constants can't be used on the left side of a {kind} statement."),
    )
}

#[cold]
pub fn constant_without_width(line: u32) -> Diagnostic {
    error(
        ErrorCode::E1010,
        line,
        "Constants in concatenations must specify a bit count.".to_owned(),
    )
}

#[cold]
pub fn constant_in_declaration(line: u32) -> Diagnostic {
    error(
        ErrorCode::E1010,
        line,
        "Constants can't be used in a module declaration.".to_owned(),
    )
}

#[cold]
pub fn constant_output(line: u32) -> Diagnostic {
    error(
        ErrorCode::E1010,
        line,
        "Constants can't be used as submodule outputs.".to_owned(),
    )
}

// Semantic Errors

#[cold]
pub fn namespace(line: u32, err: &NamespaceError) -> Diagnostic {
    error(ErrorCode::E2001, line, err.to_string())
}

#[cold]
pub fn vector_name_ends_in_digit(line: u32, name: &str) -> Diagnostic {
    error(
        ErrorCode::E2001,
        line,
        format!("Vector name '{name}' cannot end in a number."),
    )
}

#[cold]
pub fn bit_out_of_range(line: u32, text: &str) -> Diagnostic {
    error(
        ErrorCode::E2002,
        line,
        format!("Bit count of '{text}' must be between 0 and 31."),
    )
}

#[cold]
pub fn bounds_out_of_range(line: u32, text: &str) -> Diagnostic {
    error(
        ErrorCode::E2002,
        line,
        format!("Vector bounds of '{text}' must be between 0 and 31."),
    )
}

#[cold]
pub fn step_out_of_range(line: u32, text: &str) -> Diagnostic {
    error(
        ErrorCode::E2002,
        line,
        format!("Vector step of '{text}' must be between 1 and 31."),
    )
}

#[cold]
pub fn constant_too_wide(line: u32, text: &str) -> Diagnostic {
    error(
        ErrorCode::E2003,
        line,
        format!("Constant '{text}' can only have at most 32 bits."),
    )
}

#[cold]
pub fn constant_overflows_width(line: u32, text: &str, width: u32) -> Diagnostic {
    error(
        ErrorCode::E2003,
        line,
        format!("Constant '{text}' needs more than {width} bits."),
    )
}

#[cold]
pub fn expansion_mismatch(line: u32, operand: &str, dependent: &str) -> Diagnostic {
    error(
        ErrorCode::E2004,
        line,
        format!("Expansion count of '{operand}' doesn't equal the expansion count of '{dependent}'."),
    )
}

#[cold]
pub fn undimensioned_vector(line: u32, name: &str) -> Diagnostic {
    error(
        ErrorCode::E2011,
        line,
        format!("'{name}[]' cannot be used without an explicit dimension somewhere."),
    )
}

// Resource Errors

#[cold]
pub fn library_not_found(line: u32, path: &str) -> Diagnostic {
    error(
        ErrorCode::E3001,
        line,
        format!("Library '{path}' doesn't exist or is invalid."),
    )
}
