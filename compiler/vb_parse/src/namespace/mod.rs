//! Namespace registry.
//!
//! Tracks how each identifier is used across a design: either as a pure
//! scalar (`go`) or as a family of numbered bits (`a0`, `a[3..0]`). Mixing
//! the two would make `a3` ambiguous, so the second use is rejected.
//!
//! The registry also answers `name[]`: the bits a vector claimed anywhere
//! in the design, most significant first.

use std::collections::BTreeSet;
use std::fmt;

use rustc_hash::FxHashMap;

/// How one identifier is used.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum NamespaceEntry {
    /// Plain scalar without a bit index.
    Scalar,
    /// Bit indexes claimed by scalars like `a3` and vectors like `a[3..0]`.
    Bits(BTreeSet<u32>),
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum NamespaceError {
    /// A scalar use of a name that vectors already claim bits of.
    UsedByVector { name: String },
    /// A bit use of a name that is already a scalar.
    UsedByScalar { name: String },
}

impl fmt::Display for NamespaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamespaceError::UsedByVector { name } => {
                write!(f, "Namespace '{name}' is already being used by a vector.")
            }
            NamespaceError::UsedByScalar { name } => {
                write!(f, "Namespace '{name}' is already being used by a scalar.")
            }
        }
    }
}

impl std::error::Error for NamespaceError {}

#[derive(Clone, Debug, Default)]
pub struct Namespace {
    entries: FxHashMap<String, NamespaceEntry>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `name` as a plain scalar.
    pub fn claim_scalar(&mut self, name: &str) -> Result<(), NamespaceError> {
        match self.entries.get(name) {
            Some(NamespaceEntry::Bits(_)) => Err(NamespaceError::UsedByVector {
                name: name.to_owned(),
            }),
            Some(NamespaceEntry::Scalar) => Ok(()),
            None => {
                self.entries.insert(name.to_owned(), NamespaceEntry::Scalar);
                Ok(())
            }
        }
    }

    /// Claim bit indexes of `name`.
    pub fn claim_bits(
        &mut self,
        name: &str,
        bits: impl IntoIterator<Item = u32>,
    ) -> Result<(), NamespaceError> {
        let entry = self
            .entries
            .entry(name.to_owned())
            .or_insert_with(|| NamespaceEntry::Bits(BTreeSet::new()));
        match entry {
            NamespaceEntry::Scalar => Err(NamespaceError::UsedByScalar {
                name: name.to_owned(),
            }),
            NamespaceEntry::Bits(claimed) => {
                claimed.extend(bits);
                Ok(())
            }
        }
    }

    pub fn entry(&self, name: &str) -> Option<&NamespaceEntry> {
        self.entries.get(name)
    }

    /// Bit names claimed for `name`, highest bit first.
    ///
    /// `None` when `name` is unknown or a scalar.
    pub fn components(&self, name: &str) -> Option<Vec<String>> {
        match self.entries.get(name)? {
            NamespaceEntry::Scalar => None,
            NamespaceEntry::Bits(bits) => {
                Some(bits.iter().rev().map(|bit| format!("{name}{bit}")).collect())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
