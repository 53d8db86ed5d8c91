//! Centralized diagnostic constructors for evaluation.
//!
//! Every semantic or resource failure found after classification is built
//! here, so message wording lives in one place.

use std::path::PathBuf;

use vb_diagnostic::{Diagnostic, ErrorCode};

use crate::database::DatabaseError;

/// Failure to turn a file into a [`Design`](crate::Design) at all.
#[derive(Debug, thiserror::Error)]
pub enum DesignError {
    #[error("unable to read design '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("'{}' is not a .vbi design file", path.display())]
    NotADesign { path: PathBuf },
}

impl DesignError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            DesignError::Io { source, .. } => {
                Diagnostic::error(ErrorCode::E3003).with_message(format!("{self}: {source}."))
            }
            DesignError::NotADesign { .. } => {
                Diagnostic::error(ErrorCode::E3003).with_message(format!("{self}."))
            }
        }
    }
}

// Dependency Errors

#[cold]
pub fn self_dependency(name: &str, line: u32) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2005)
        .with_message(format!("'{name}' cannot depend on itself."))
        .at_line(line)
}

#[cold]
pub fn circular_dependency(name: &str, path: &str, line: u32) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2010)
        .with_message(format!("'{name}' has a circular dependency: {path}."))
        .at_line(line)
}

#[cold]
pub fn multiple_drivers(name: &str, line: u32) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2014)
        .with_message(format!("'{name}' is already assigned by another statement."))
        .at_line(line)
}

#[cold]
pub fn kind_conflict(name: &str, line: u32) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2015)
        .with_message(format!(
            "'{name}' can't be both an independent and a dependent variable."
        ))
        .at_line(line)
}

#[cold]
pub fn unknown_variable(name: &str, line: u32) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2011)
        .with_message(format!("'{name}' is not an independent variable in this design."))
        .at_line(line)
}

/// A click on something that isn't an independent variable of the parsed
/// design.
#[cold]
pub fn not_clickable(name: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2011)
        .with_message(format!("'{name}' is not a variable in this design."))
}

/// A click or tick on a design without a successful full parse.
#[cold]
pub fn not_parsed(design: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2016)
        .with_message(format!("Design '{design}' must be parsed before it can be simulated."))
}

/// Map a database failure onto the diagnostic for the statement at `line`.
pub fn from_database(error: &DatabaseError, line: u32) -> Diagnostic {
    match error {
        DatabaseError::KindConflict { name, .. } => kind_conflict(name, line),
        DatabaseError::SelfDependency { name } => self_dependency(name, line),
        DatabaseError::MultipleDrivers { name } => multiple_drivers(name, line),
        DatabaseError::Cycle { name, path, line } => circular_dependency(name, path, *line),
        DatabaseError::Unknown { name } => unknown_variable(name, line),
    }
}

// Module Errors

#[cold]
pub fn multiple_module_declarations(line: u32) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2006)
        .with_message("Designs can only have one module statement.")
        .at_line(line)
}

#[cold]
pub fn not_independent_input(name: &str, line: u32) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2009)
        .with_message(format!(
            "'{name}' must be an independent variable to be used as an input in a module declaration statement."
        ))
        .at_line(line)
}

#[cold]
pub fn missing_module_declaration(design: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2012)
        .with_message(format!("Design '{design}' has no module declaration."))
}

// Instantiation Errors

#[cold]
pub fn instantiate_current_design(line: u32) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2008)
        .with_message("You cannot instantiate from the current design.")
        .at_line(line)
}

#[cold]
pub fn instance_name_used(instance: &str, line: u32) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2008)
        .with_message(format!("Instantiation name '{instance}' is already being used."))
        .at_line(line)
}

#[cold]
pub fn design_not_found(design: &str, line: u32) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3002)
        .with_message(format!(
            "Unable to find a design named '{design}' with a module declaration."
        ))
        .at_line(line)
}

#[cold]
pub fn arity_mismatch(line: u32) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2007)
        .with_message(
            "Instantiation doesn't have the same number of input/output variables as the matching module declaration.",
        )
        .at_line(line)
}

#[cold]
pub fn nesting_too_deep(limit: u32, line: u32) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2013)
        .with_message(format!(
            "Submodule nesting exceeds the maximum depth of {limit}."
        ))
        .at_line(line)
}

/// Note attached to diagnostics re-emitted from a subdesign.
pub fn in_design_note(design: &str) -> String {
    format!("in design '{design}'")
}

// Resource Errors

#[cold]
pub fn unreadable_design(design: &str, line: u32) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3003)
        .with_message(format!("Unable to read design '{design}'."))
        .at_line(line)
}

// Internal Errors

#[cold]
pub fn internal(message: impl std::fmt::Display, line: u32) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9001)
        .with_message(format!("Internal error: {message}."))
        .at_line(line)
}
