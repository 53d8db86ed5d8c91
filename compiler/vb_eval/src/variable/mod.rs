//! Variables stored in the database.

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum VariableKind {
    /// Driven by the user, by module inputs, or by a clock.
    Independent,
    /// The target of an assignment or a submodule output.
    Dependent,
}

impl VariableKind {
    pub fn is_independent(self) -> bool {
        self == VariableKind::Independent
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableKind::Independent => f.write_str("independent"),
            VariableKind::Dependent => f.write_str("dependent"),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Variable {
    pub name: String,
    pub value: bool,
    pub kind: VariableKind,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, u8::from(self.value))
    }
}
