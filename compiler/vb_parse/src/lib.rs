//! Front half of the VisiBoole pipeline.
//!
//! Source text flows through these stages before anything is evaluated:
//!
//! 1. [`vb_lexer_core::read_statements`] splits the design into statements
//! 2. [`classify`] decides each statement's [`StatementKind`], enforces the
//!    grammar and claims names in the [`Namespace`]
//! 3. [`Expander`] rewrites vectors, constants and concatenations into
//!    plain scalar lines
//!
//! Module signatures ([`signature`]) and the design search path
//! ([`SearchPath`]) are used by both the classifier's callers and the
//! evaluator when submodules are involved.

pub mod classify;
pub mod errors;
mod expand;
mod namespace;
mod piece;
mod search_path;
pub mod signature;

pub use classify::{
    classify, comment_parts, library_path, Classified, CommentParts, CommentVisibility,
    StatementKind,
};
pub use expand::{ExpandedStatement, Expander};
pub use namespace::{Namespace, NamespaceEntry, NamespaceError};
pub use piece::{pieces, Piece};
pub use search_path::{LibraryError, SearchPath, DESIGN_EXTENSION};
pub use signature::{find_module_declaration, ModuleSignature};
