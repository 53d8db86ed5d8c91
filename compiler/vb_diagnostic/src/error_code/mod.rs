//! Error codes for all engine diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E2004`) with the first digit
//! indicating the failure class. Used for `--explain` lookups and documentation.

use std::fmt;

/// Error codes for all engine diagnostics.
///
/// Format: E#### where first digit indicates the class:
/// - E0xxx: Lexical errors
/// - E1xxx: Syntax errors
/// - E2xxx: Semantic errors
/// - E3xxx: Resource errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexical Errors (E0xxx)
    /// Invalid character in source
    E0001,
    /// Unmatched grouping character
    E0002,
    /// Grouping used inside a concatenation
    E0003,
    /// Misplaced statement terminator
    E0004,
    /// Statement is missing its terminator
    E0005,
    /// Unrecognized token
    E0006,

    // Syntax Errors (E1xxx)
    /// Operator used outside the statement kind that allows it
    E1001,
    /// Comma or colon outside a module parameter list
    E1002,
    /// More than one assignment or clock operator
    E1003,
    /// Misuse of the negation marker `~`
    E1004,
    /// Misuse of the independent marker `*`
    E1005,
    /// Invalid assignment target or missing expression
    E1006,
    /// Boolean and math operators in one statement
    E1007,
    /// Malformed module declaration or instantiation
    E1008,
    /// Malformed format specifier statement
    E1009,
    /// Constant used where it can't be
    E1010,

    // Semantic Errors (E2xxx)
    /// Scalar/vector namespace collision
    E2001,
    /// Bit, bound or step out of range
    E2002,
    /// Constant wider than allowed
    E2003,
    /// Expansion count mismatch
    E2004,
    /// Dependent depends on itself
    E2005,
    /// More than one module declaration
    E2006,
    /// Instantiation arity doesn't match the module declaration
    E2007,
    /// Invalid instantiation target or instance name
    E2008,
    /// Module input is not an independent variable
    E2009,
    /// Circular dependency
    E2010,
    /// Unknown variable
    E2011,
    /// Design has no module declaration
    E2012,
    /// Submodule nesting too deep
    E2013,
    /// Dependent assigned by more than one statement
    E2014,
    /// Variable registered with conflicting kinds
    E2015,
    /// Simulation without a successful full parse
    E2016,

    // Resource Errors (E3xxx)
    /// Library directory not found
    E3001,
    /// Design with a module declaration not found
    E3002,
    /// Design file unreadable
    E3003,

    // Internal Errors (E9xxx)
    /// Internal engine error
    E9001,
    /// Too many errors
    E9002,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    ///
    /// Kept in sync with `as_str()` which is exhaustive (Rust match enforces it).
    /// When adding a new variant: add it to the enum, `as_str()`, and here.
    pub const ALL: &[ErrorCode] = &[
        // Lexical
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        // Syntax
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E1008,
        ErrorCode::E1009,
        ErrorCode::E1010,
        // Semantic
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E2009,
        ErrorCode::E2010,
        ErrorCode::E2011,
        ErrorCode::E2012,
        ErrorCode::E2013,
        ErrorCode::E2014,
        ErrorCode::E2015,
        ErrorCode::E2016,
        // Resource
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        // Internal
        ErrorCode::E9001,
        ErrorCode::E9002,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexical
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            // Syntax
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            // Semantic
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            ErrorCode::E2012 => "E2012",
            ErrorCode::E2013 => "E2013",
            ErrorCode::E2014 => "E2014",
            ErrorCode::E2015 => "E2015",
            ErrorCode::E2016 => "E2016",
            // Resource
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            // Internal
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
        }
    }

    /// Check if this is a lexical error (E0xxx range).
    pub fn is_lexical_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E0001
                | ErrorCode::E0002
                | ErrorCode::E0003
                | ErrorCode::E0004
                | ErrorCode::E0005
                | ErrorCode::E0006
        )
    }

    /// Check if this is a syntax error (E1xxx range).
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E1001
                | ErrorCode::E1002
                | ErrorCode::E1003
                | ErrorCode::E1004
                | ErrorCode::E1005
                | ErrorCode::E1006
                | ErrorCode::E1007
                | ErrorCode::E1008
                | ErrorCode::E1009
                | ErrorCode::E1010
        )
    }

    /// Check if this is a semantic error (E2xxx range).
    pub fn is_semantic_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E2001
                | ErrorCode::E2002
                | ErrorCode::E2003
                | ErrorCode::E2004
                | ErrorCode::E2005
                | ErrorCode::E2006
                | ErrorCode::E2007
                | ErrorCode::E2008
                | ErrorCode::E2009
                | ErrorCode::E2010
                | ErrorCode::E2011
                | ErrorCode::E2012
                | ErrorCode::E2013
                | ErrorCode::E2014
                | ErrorCode::E2015
                | ErrorCode::E2016
        )
    }

    /// Check if this is a resource error (E3xxx range).
    pub fn is_resource_error(&self) -> bool {
        matches!(self, ErrorCode::E3001 | ErrorCode::E3002 | ErrorCode::E3003)
    }

    /// Check if this is an internal engine error (E9xxx range).
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001 | ErrorCode::E9002)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2004"`.
///
/// Case-insensitive. Derived from [`ErrorCode::ALL`] and [`ErrorCode::as_str()`],
/// so it stays exhaustive without manual mirroring.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
