//! VB Eval - dependency database, statement evaluation and design
//! orchestration for VisiBoole.
//!
//! # Architecture
//!
//! - [`Design`]: one `.vbi` file and every evaluation entry point (full
//!   parse, click, tick, submodule evaluation)
//! - [`Database`]: variables, stored expressions, dependency lists, clocks
//! - `expr`: boolean and math expressions over expanded statement text
//! - [`Statement`]: typed statement variants that render to [`OutputToken`]s
//! - [`Settings`]: read-only options passed into every design
//!
//! Submodules are evaluated by constructing a child [`Design`] with its own
//! [`Database`], so instances never share state.

pub mod database;
mod design;
pub mod errors;
pub mod expr;
mod output;
mod settings;
pub mod statement;
mod variable;

pub use database::{Database, DatabaseError};
pub use design::Design;
pub use errors::DesignError;
pub use output::{render_tokens, OutputToken};
pub use settings::{CycleDetection, Settings};
pub use statement::{Statement, StatementBody};
pub use variable::{Variable, VariableKind};
